mod audio_format_test;
mod travel_mode_test;
