use sigil_core::{
    derive_numerology, ChakraType, EvolutionParent, EvolutionStage, NewSigil, NumerologyProfile,
    SigilValidationError, SigilVisual, UniversalLaw,
};
use uuid::Uuid;

fn new_sigil() -> NewSigil {
    NewSigil {
        owner_id: Uuid::new_v4(),
        chakra: ChakraType::SolarPlexus,
        frequency_hz: 528.0,
        intention: "Generate courage".to_string(),
        numerology: derive_numerology("Generate courage"),
        visual: SigilVisual("blob".to_string()),
        evolved_from: None,
    }
}

#[test]
fn sigil_serialization_uses_expected_wire_fields() {
    let sigil_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let parent_id = Uuid::parse_str("66666666-7777-4888-9999-aaaaaaaaaaaa").unwrap();
    let mut payload = new_sigil();
    payload.evolved_from = Some(EvolutionParent {
        parent_id,
        parent_stage: EvolutionStage::Sprout,
    });
    let sigil = payload.into_sigil(sigil_id, 1_700_000_000_000);

    let json = serde_json::to_value(&sigil).unwrap();
    assert_eq!(json["id"], sigil_id.to_string());
    assert_eq!(json["chakra"], "solar_plexus");
    assert_eq!(json["frequency_hz"], 528.0);
    assert_eq!(json["visual"], "blob");
    assert_eq!(json["created_at_ms"], 1_700_000_000_000_i64);
    assert_eq!(json["evolved_from"]["parent_id"], parent_id.to_string());
    assert_eq!(json["evolved_from"]["parent_stage"], "sprout");

    let decoded: sigil_core::Sigil = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, sigil);
}

#[test]
fn new_sigil_validation_rejects_bad_attributes_but_allows_empty_intention() {
    let mut nil_owner = new_sigil();
    nil_owner.owner_id = Uuid::nil();
    assert_eq!(nil_owner.validate(), Err(SigilValidationError::NilOwner));

    let mut negative = new_sigil();
    negative.frequency_hz = -1.0;
    assert_eq!(
        negative.validate(),
        Err(SigilValidationError::InvalidFrequency(-1.0))
    );

    let mut blank = new_sigil();
    blank.intention = String::new();
    assert_eq!(blank.validate(), Ok(()));

    let mut numerology = new_sigil();
    numerology.numerology = NumerologyProfile {
        numbers: vec![34],
        ..NumerologyProfile::default()
    };
    assert_eq!(
        numerology.validate(),
        Err(SigilValidationError::NumerologyOutOfRange(34))
    );
}

#[test]
fn persisted_sigil_rejects_self_parent_but_allows_empty_intention() {
    let id = Uuid::new_v4();
    let mut payload = new_sigil();
    payload.intention = String::new();
    let plain = payload.clone().into_sigil(id, 0);
    assert_eq!(plain.validate(), Ok(()));

    payload.evolved_from = Some(EvolutionParent {
        parent_id: id,
        parent_stage: EvolutionStage::Seed,
    });
    let looped = payload.into_sigil(id, 0);
    assert_eq!(looped.validate(), Err(SigilValidationError::SelfParent(id)));
}

#[test]
fn frequency_label_renders_whole_numbers_without_fraction() {
    let sigil = new_sigil().into_sigil(Uuid::new_v4(), 0);
    assert_eq!(sigil.frequency_label(), "528");
}

#[test]
fn stage_ladder_is_ordered_with_fixed_thresholds() {
    let thresholds: Vec<f64> = EvolutionStage::ALL
        .iter()
        .map(|stage| stage.required_resonance())
        .collect();
    assert_eq!(thresholds, vec![40.0, 60.0, 75.0, 85.0, 100.0]);
    assert!(EvolutionStage::Seed < EvolutionStage::Transcendent);
    assert_eq!(EvolutionStage::Transcendent.next(), None);
    assert_eq!(EvolutionStage::Mature.next(), Some(EvolutionStage::Transcendent));
}

#[test]
fn law_catalog_has_nine_named_laws() {
    assert_eq!(UniversalLaw::ALL.len(), 9);
    assert_eq!(UniversalLaw::CauseAndEffect.name(), "Cause & Effect");
    assert!(UniversalLaw::ALL
        .iter()
        .all(|law| !law.description().is_empty()));
}
