use wayfarer::domain::AudioFormat;

#[test]
fn given_known_format_names_when_parsing_then_returns_matching_variant() {
    assert_eq!("mp3".parse::<AudioFormat>().unwrap(), AudioFormat::Mp3);
    assert_eq!("WAV".parse::<AudioFormat>().unwrap(), AudioFormat::Wav);
    assert_eq!("Ogg".parse::<AudioFormat>().unwrap(), AudioFormat::Ogg);
    assert_eq!("flac".parse::<AudioFormat>().unwrap(), AudioFormat::Flac);
}

#[test]
fn given_unknown_format_name_when_parsing_then_error_lists_supported_formats() {
    let error = "aiff".parse::<AudioFormat>().unwrap_err();

    assert!(error.contains("aiff"));
    assert!(error.contains("mp3, wav, ogg, flac"));
}

#[test]
fn given_each_format_when_mapping_to_provider_encoding_then_wav_is_linear16() {
    assert_eq!(AudioFormat::Mp3.provider_encoding(), "MP3");
    assert_eq!(AudioFormat::Wav.provider_encoding(), "LINEAR16");
    assert_eq!(AudioFormat::Ogg.provider_encoding(), "OGG_OPUS");
    assert_eq!(AudioFormat::Flac.provider_encoding(), "FLAC");
}

#[test]
fn given_no_format_when_defaulting_then_mp3_is_used() {
    assert_eq!(AudioFormat::default(), AudioFormat::Mp3);
}
