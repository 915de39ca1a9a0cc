mod flowise_client_test;
mod google_directions_test;
mod google_recognizer_test;
