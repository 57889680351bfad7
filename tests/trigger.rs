use l2si_header::trigger::{
    DISCRIMINANT, EventInfo, TransitionInfo, TriggerInfo, TriggerInfoKind, TriggerKind,
};
use l2si_header::{Error, EventHeader, Result};

#[test]
fn discriminant_selects_layout() {
    assert!(TriggerInfo::from_u16(0x8000).is_event());
    assert!(!TriggerInfo::from_u16(0x0000).is_event());
    assert_eq!(TriggerInfo::from_u16(0x8000).kind(), TriggerKind::Event);
    assert_eq!(TriggerInfo::from_u16(0x0000).kind(), TriggerKind::Transition);
}

#[test]
fn event_info_from_example_word() -> Result<()> {
    // 1000 0000 0010 0001
    let info = TriggerInfo::from_u16(0x8021).as_event_info()?;
    assert!(info.l0_accept());
    assert_eq!(info.l0_tag(), 0x10);
    assert!(!info.l0_reject());
    assert!(!info.l1_expect());
    assert!(!info.l1_accept());
    assert_eq!(info.l1_tag(), 0);
    Ok(())
}

#[test]
fn event_info_all_fields() -> Result<()> {
    // l1Tag=0b10101, l1Accept, l1Expect, l0Reject, l0Tag=0b01010, l0Accept
    let word = DISCRIMINANT | 0b10101 << 10 | 1 << 9 | 1 << 8 | 1 << 7 | 0b01010 << 1 | 1;
    let info = TriggerInfo::from_u16(word).as_event_info()?;
    assert_eq!(
        info,
        EventInfo::new(0b01010, 0b10101)?
            .with_l0_accept(true)
            .with_l0_reject(true)
            .with_l1_expect(true)
            .with_l1_accept(true)
    );
    assert_eq!(info.to_word(), word);
    Ok(())
}

#[test]
fn transition_info_fields() -> Result<()> {
    // header=0b1100101, l0Tag=0b00111
    let word = 0b1100101 << 8 | 0b00111 << 1;
    let info = TriggerInfo::from_u16(word).as_transition_info()?;
    assert_eq!(info, TransitionInfo::new(0b00111, 0b1100101)?);
    assert_eq!(info.to_word(), word);
    Ok(())
}

#[test]
fn wrong_accessor_fails_loudly() {
    match TriggerInfo::from_u16(0x0042).as_event_info() {
        Err(Error::TriggerKindMismatch { expected, actual }) => {
            assert_eq!(expected, TriggerKind::Event);
            assert_eq!(actual, TriggerKind::Transition);
        }
        other => panic!("unexpected {other:?}"),
    }

    let err = TriggerInfo::from_u16(0x8042).as_transition_info().unwrap_err();
    assert!(err.is_contract_violation());
}

#[test]
fn mechanical_decode_ignores_discriminant() {
    // The explicit constructors read the bits regardless of bit 15
    let word = 0x0021;
    let info = EventInfo::from_word(word);
    assert!(info.l0_accept());
    assert_eq!(info.l0_tag(), 0x10);

    let info = TransitionInfo::from_word(0x8000 | 0x0A04);
    assert_eq!(info.l0_tag(), 0x02);
    assert_eq!(info.header(), 0x0A);
}

#[test]
fn tagged_union_matches_accessors() -> Result<()> {
    for word in [0x0000u16, 0x0A04, 0x7FFF, 0x8000, 0x8021, 0xFFFF] {
        let info = TriggerInfo::from_u16(word);
        match info.decode() {
            TriggerInfoKind::Event(e) => {
                assert!(info.is_event());
                assert_eq!(e, info.as_event_info()?);
            }
            TriggerInfoKind::Transition(t) => {
                assert!(info.is_transition());
                assert_eq!(t, info.as_transition_info()?);
            }
        }
    }
    Ok(())
}

#[test]
fn display_uses_active_layout() -> Result<()> {
    assert_eq!(
        TriggerInfo::from_u16(0x8021).to_string(),
        "l0Accept - 1\nl0Tag - 10\nl0Reject - 0\nl1Expect - 0\nl1Accept - 0\nl1Tag - 0"
    );
    let transition = TriggerInfo::from(TransitionInfo::new(0x01, 0x7F)?);
    assert_eq!(transition.to_string(), "l0Tag - 1\nheader - 7f");
    Ok(())
}

#[test]
fn trigger_info_serializes_as_word() {
    let json = serde_json::to_string(&TriggerInfo::from_u16(0x8021)).unwrap();
    assert_eq!(json, "32801");
    let back: TriggerInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_u16(), 0x8021);
}

#[test]
fn oversized_tags_never_reach_the_word() -> Result<()> {
    for (l0_tag, l1_tag) in [(0x20, 0), (0, 0x20), (0x3F, 0x3F), (0xFF, 0)] {
        match EventInfo::new(l0_tag, l1_tag) {
            Err(Error::FieldOverflow { max, .. }) => assert_eq!(max, 0x1F),
            other => panic!("unexpected {other:?}"),
        }
    }
    assert!(TransitionInfo::new(0x01, 0xFF).is_err());

    // A header built from in-range parts reads back what went in
    let info = TransitionInfo::new(0x01, 0x7F)?;
    let header = EventHeader::builder().trigger_info(info).build()?;
    assert_eq!(header.trigger_info().as_transition_info()?, info);
    Ok(())
}

#[test]
fn deserialized_info_is_width_checked() -> Result<()> {
    let info = EventInfo::new(0x1F, 0x02)?.with_l1_accept(true);
    let json = serde_json::to_string(&info).unwrap();
    let back: EventInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(back, info);
    assert_eq!(TriggerInfo::from(back).as_event_info()?, info);

    let oversized = json.replace("\"l0_tag\":31", "\"l0_tag\":63");
    assert_ne!(oversized, json);
    assert!(serde_json::from_str::<EventInfo>(&oversized).is_err());

    assert!(serde_json::from_str::<TransitionInfo>(r#"{"l0_tag":1,"header":127}"#).is_ok());
    assert!(serde_json::from_str::<TransitionInfo>(r#"{"l0_tag":1,"header":255}"#).is_err());

    // The tagged union validates its payload the same way
    let kind = TriggerInfoKind::Transition(TransitionInfo::new(0x01, 0x7F)?);
    let json = serde_json::to_string(&kind).unwrap();
    assert_eq!(serde_json::from_str::<TriggerInfoKind>(&json).unwrap(), kind);
    let oversized = json.replace("127", "255");
    assert!(serde_json::from_str::<TriggerInfoKind>(&oversized).is_err());
    Ok(())
}
