use midly::{live::LiveEvent, MidiMessage};

/// The two message kinds the triggers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Note,
    ControlChange,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Note => write!(f, "Note"),
            Self::ControlChange => write!(f, "CC"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unrecognised MIDI message kind : {0}")]
pub struct ParseEventKindError(String);

impl std::str::FromStr for EventKind {
    type Err = ParseEventKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Note" | "note" => Ok(Self::Note),
            "CC" | "cc" | "ControlChange" | "control_change" => Ok(Self::ControlChange),
            other => Err(ParseEventKindError(other.to_owned())),
        }
    }
}

/// A classified input signal. `address` is the note key or controller
/// number, `value` the velocity or controller value. The status byte's
/// wire channel (low nibble) is deliberately not part of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlEvent {
    pub kind: EventKind,
    pub address: u8,
    pub value: u8,
}

/// Classify a raw message. Only note-on and control-change produce an
/// event; anything else, including unparseable bytes, is silently dropped.
pub fn classify(bytes: &[u8]) -> Option<ControlEvent> {
    let LiveEvent::Midi { message, .. } = LiveEvent::parse(bytes).ok()? else {
        return None;
    };

    match message {
        MidiMessage::NoteOn { key, vel } => Some(ControlEvent {
            kind: EventKind::Note,
            address: key.as_int(),
            value: vel.as_int(),
        }),
        MidiMessage::Controller { controller, value } => Some(ControlEvent {
            kind: EventKind::ControlChange,
            address: controller.as_int(),
            value: value.as_int(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn note_on_is_classified_on_every_wire_channel() {
        for channel in 0..16u8 {
            let event = classify(&[0x90 | channel, 3, 100]).unwrap();
            assert_eq!(event.kind, EventKind::Note);
            assert_eq!(event.address, 3);
            assert_eq!(event.value, 100);
        }
    }

    #[test]
    fn control_change_is_classified_on_every_wire_channel() {
        for channel in 0..16u8 {
            let event = classify(&[0xB0 | channel, 12, 50]).unwrap();
            assert_eq!(event.kind, EventKind::ControlChange);
            assert_eq!(event.address, 12);
            assert_eq!(event.value, 50);
        }
    }

    #[test]
    fn other_status_bytes_produce_no_event() {
        assert!(classify(&[0x80, 3, 100]).is_none()); // note off
        assert!(classify(&[0xA0, 3, 100]).is_none()); // poly aftertouch
        assert!(classify(&[0xC0, 7]).is_none()); // program change
        assert!(classify(&[0xE0, 0, 64]).is_none()); // pitch bend
        assert!(classify(&[0xF8]).is_none()); // clock
    }

    #[test]
    fn garbage_produces_no_event() {
        assert!(classify(&[]).is_none());
        assert!(classify(&[0x03, 0x04]).is_none());
        assert!(classify(&[0x90]).is_none());
    }

    #[test]
    fn event_kinds_parse_from_their_frontend_list_values() {
        assert_eq!("Note".parse::<EventKind>().unwrap(), EventKind::Note);
        assert_eq!("CC".parse::<EventKind>().unwrap(), EventKind::ControlChange);
        assert!("NoteOff".parse::<EventKind>().is_err());
    }
}
