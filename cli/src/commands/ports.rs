use colored::*;
use showcue::midi::{HostedMidiInput, MidiReceiving};

pub fn run() -> anyhow::Result<()> {
    let midi_in = HostedMidiInput::new()?;
    let ports = midi_in.list_midi_devices()?;

    if ports.is_empty() {
        println!("{}", "no MIDI input ports available".dimmed());
        return Ok(());
    }

    for (index, name) in ports.iter().enumerate() {
        println!("{} {name}", format!("{index:>3} :").dimmed());
    }

    Ok(())
}
