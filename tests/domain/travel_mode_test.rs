use wayfarer::domain::TravelMode;

#[test]
fn given_mode_names_when_parsing_then_case_is_ignored() {
    assert_eq!("Transit".parse::<TravelMode>().unwrap(), TravelMode::Transit);
    assert_eq!("DRIVING".parse::<TravelMode>().unwrap(), TravelMode::Driving);
    assert_eq!("walking".parse::<TravelMode>().unwrap(), TravelMode::Walking);
}

#[test]
fn given_cycling_alias_when_parsing_then_maps_to_bicycling() {
    assert_eq!(
        "cycling".parse::<TravelMode>().unwrap(),
        TravelMode::Bicycling
    );
}

#[test]
fn given_unknown_mode_when_parsing_then_returns_error() {
    assert!("teleport".parse::<TravelMode>().is_err());
}

#[test]
fn given_no_mode_when_defaulting_then_transit_is_used() {
    assert_eq!(TravelMode::default(), TravelMode::Transit);
}
