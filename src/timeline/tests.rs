use super::*;
use crate::sequence::{
    ControlChange, InstrumentInfo, KeySignature, Note, NoteSequence, Tempo, TimeSignature,
};
use crate::{convert, ConvertError};

fn note(start: f64, end: f64, pitch: u8) -> Note {
    Note {
        start_time: start,
        end_time: end,
        pitch,
        velocity: 127,
        instrument_track: 0,
        program: 0,
        is_drum: false,
    }
}

fn cc(time: f64, number: u8, value: u8) -> ControlChange {
    ControlChange {
        time,
        instrument_track: 0,
        control_number: number,
        control_value: value,
    }
}

fn ts(time: f64, numerator: u32, denominator: u32) -> TimeSignature {
    TimeSignature {
        time,
        numerator,
        denominator,
    }
}

fn seq_120(total_time: f64) -> NoteSequence {
    let mut seq = NoteSequence::new(480);
    seq.tempos.push(Tempo { time: 0.0, qpm: 120.0 });
    seq.total_time = total_time;
    seq
}

#[test]
fn test_half_second_note_at_120() {
    let mut seq = seq_120(0.5);
    seq.notes.push(note(0.0, 0.5, 60));

    let doc = convert(&seq).unwrap();
    let n = &doc.tracks[0].notes[0];
    assert_eq!(n.ticks, 0);
    assert_eq!(n.duration_ticks, 480);
    assert_eq!(n.time, 0.0);
    assert_eq!(n.duration, 0.5);
    assert_eq!(n.velocity, 1.0);
    assert_eq!(n.midi, 60);
    assert_eq!(n.name, "C4");
}

#[test]
fn test_default_tempo_without_tempos() {
    let mut seq = NoteSequence::new(480);
    seq.notes.push(note(1.0, 1.5, 62));
    seq.total_time = 1.5;

    let doc = convert(&seq).unwrap();
    assert!(doc.header.tempos.is_empty());
    assert_eq!(doc.tracks[0].notes[0].ticks, 960);
}

#[test]
fn test_note_past_declared_total_time() {
    // totalTime 0 leaves a one-tick table; the note is extrapolated
    let mut seq = NoteSequence::new(480);
    seq.notes.push(note(1.0, 1.25, 62));

    let doc = convert(&seq).unwrap();
    assert_eq!(doc.tracks[0].notes[0].ticks, 960);
    assert_eq!(doc.tracks[0].notes[0].duration_ticks, 240);
}

#[test]
fn test_two_tempo_header() {
    let mut seq = seq_120(4.0);
    seq.tempos.push(Tempo { time: 2.0, qpm: 240.0 });

    let doc = convert(&seq).unwrap();
    let tempos = &doc.header.tempos;
    assert_eq!(tempos.len(), 2);
    assert_eq!((tempos[0].ticks, tempos[0].bpm), (0, 120.0));
    assert_eq!((tempos[1].ticks, tempos[1].bpm), (1920, 240.0));
}

#[test]
fn test_empty_signatures_with_notes() {
    let mut seq = seq_120(1.0);
    seq.notes.push(note(0.0, 1.0, 60));

    let doc = convert(&seq).unwrap();
    assert!(doc.header.time_signatures.is_empty());
    assert!(doc.header.key_signatures.is_empty());
    assert_eq!(doc.tracks.len(), 1);
}

#[test]
fn test_drum_note_uses_kit_name() {
    let mut seq = seq_120(1.0);
    let mut kick = note(0.0, 0.1, 36);
    kick.is_drum = true;
    seq.notes.push(kick);

    let doc = convert(&seq).unwrap();
    let instrument = &doc.tracks[0].instrument;
    assert_eq!(instrument.name, "standard kit");
    assert_eq!(instrument.family, "drums");
    assert_eq!(instrument.number, 0);
}

#[test]
fn test_unmapped_drum_kit_is_an_error() {
    let mut seq = seq_120(1.0);
    let mut hit = note(0.0, 0.1, 38);
    hit.is_drum = true;
    hit.program = 3;
    seq.notes.push(hit);

    assert_eq!(
        convert(&seq),
        Err(ConvertError::UnknownProgram {
            program: 3,
            is_drum: true
        })
    );
}

#[test]
fn test_measure_accumulation() {
    let mut seq = seq_120(8.0);
    seq.time_signatures = vec![
        ts(0.0, 4, 4),
        ts(4.0, 3, 4), // 8 beats of 4/4
        ts(5.5, 6, 8), // 3 beats of 3/4
        ts(6.5, 6, 8), // 2 beats, less than one 6/8 measure
    ];

    let doc = convert(&seq).unwrap();
    let sigs = &doc.header.time_signatures;
    assert_eq!(sigs[0].ticks, 0);
    assert_eq!(sigs[0].measures, 0);
    assert_eq!(sigs[1].ticks, 3840);
    assert_eq!(sigs[1].measures, 2);
    assert_eq!(sigs[1].time_signature, [3, 4]);
    assert_eq!(sigs[2].measures, 3);
    assert_eq!(sigs[3].measures, 3);

    for pair in sigs.windows(2) {
        assert!(pair[1].measures >= pair[0].measures);
    }
}

#[test]
fn test_first_time_signature_not_at_zero() {
    let mut seq = seq_120(4.0);
    seq.time_signatures.push(ts(2.0, 3, 4));

    let doc = convert(&seq).unwrap();
    assert_eq!(doc.header.time_signatures[0].ticks, 1920);
    assert_eq!(doc.header.time_signatures[0].measures, 0);
}

#[test]
fn test_key_signatures() {
    let mut seq = seq_120(2.0);
    seq.key_signatures = vec![
        KeySignature {
            time: 0.0,
            key: 0,
            mode: 0,
        },
        KeySignature {
            time: 1.0,
            key: 3,
            mode: 1,
        },
    ];

    let doc = convert(&seq).unwrap();
    let keys = &doc.header.key_signatures;
    assert_eq!(keys[0].key, "C");
    assert_eq!(keys[0].scale, Scale::Major);
    assert_eq!(keys[1].ticks, 960);
    assert_eq!(keys[1].key, "Eb");
    assert_eq!(keys[1].scale, Scale::Minor);
}

#[test]
fn test_inferred_track_count() {
    let mut seq = seq_120(1.0);
    let mut high = note(0.0, 0.5, 67);
    high.instrument_track = 2;
    seq.notes.push(note(0.0, 0.5, 60));
    seq.notes.push(high);

    let doc = convert(&seq).unwrap();
    assert_eq!(doc.tracks.len(), 3);
    assert_eq!(doc.tracks[0].notes.len(), 1);
    assert!(doc.tracks[1].notes.is_empty());
    assert_eq!(doc.tracks[2].notes[0].midi, 67);
    assert!(doc.tracks.iter().all(|t| t.name.is_empty()));
}

#[test]
fn test_no_notes_no_tracks() {
    let mut seq = seq_120(1.0);
    seq.time_signatures.push(ts(0.0, 4, 4));

    let doc = convert(&seq).unwrap();
    assert!(doc.tracks.is_empty());
}

#[test]
fn test_declared_instruments() {
    let mut seq = seq_120(1.0);
    seq.instrument_infos = Some(vec![
        InstrumentInfo {
            track_index: 5,
            name: "Violin I".to_string(),
        },
        InstrumentInfo {
            track_index: 1,
            name: "Cello".to_string(),
        },
    ]);
    let mut cello = note(0.0, 1.0, 36);
    cello.instrument_track = 1;
    cello.program = 42;
    seq.notes.push(cello);

    let doc = convert(&seq).unwrap();
    assert_eq!(doc.tracks.len(), 2);
    assert_eq!(doc.tracks[0].name, "Violin I");
    assert!(doc.tracks[0].notes.is_empty());
    // Track without notes keeps the default instrument
    assert_eq!(doc.tracks[0].instrument.name, "acoustic grand piano");
    assert_eq!(doc.tracks[1].name, "Cello");
    assert_eq!(doc.tracks[1].instrument.name, "cello");
    assert_eq!(doc.tracks[1].instrument.family, "strings");
}

#[test]
fn test_note_on_undeclared_track() {
    let mut seq = seq_120(1.0);
    seq.instrument_infos = Some(vec![InstrumentInfo {
        track_index: 0,
        name: "Piano".to_string(),
    }]);
    let mut stray = note(0.0, 1.0, 60);
    stray.instrument_track = 4;
    seq.notes.push(stray);

    assert_eq!(convert(&seq), Err(ConvertError::UnknownTrack { track: 4 }));
}

#[test]
fn test_controller_beyond_inferred_tracks() {
    let mut seq = seq_120(1.0);
    seq.notes.push(note(0.0, 1.0, 60));
    let mut pedal = cc(0.5, 64, 127);
    pedal.instrument_track = 1;
    seq.control_changes.push(pedal);

    assert_eq!(convert(&seq), Err(ConvertError::UnknownTrack { track: 1 }));
}

#[test]
fn test_duration_ticks_constant_tempo() {
    let mut seq = seq_120(4.0);
    seq.notes.push(note(0.0, 0.75, 60));
    seq.notes.push(note(2.3, 3.05, 64));

    let doc = convert(&seq).unwrap();
    let notes = &doc.tracks[0].notes;
    assert_eq!(notes[0].duration_ticks, notes[1].duration_ticks);
    assert_eq!(notes[0].duration_ticks, 720);
}

#[test]
fn test_duration_ticks_is_elapsed_conversion() {
    // After the tempo doubles, 0.5s spans 960 ticks of position but the
    // duration is still converted from tick 0 at 120 qpm
    let mut seq = seq_120(4.0);
    seq.tempos.push(Tempo { time: 2.0, qpm: 240.0 });
    seq.notes.push(note(2.0, 2.5, 60));

    let doc = convert(&seq).unwrap();
    let n = &doc.tracks[0].notes[0];
    assert_eq!(n.ticks, 1920);
    assert_eq!(n.duration_ticks, 480);
    assert_eq!(doc.tracks[0].end_of_track_ticks, 2400);
}

#[test]
fn test_end_of_track_ticks() {
    let mut seq = seq_120(2.0);
    seq.notes.push(note(0.0, 1.5, 60));
    seq.notes.push(note(0.5, 1.0, 64));

    let doc = convert(&seq).unwrap();
    assert_eq!(doc.tracks[0].end_of_track_ticks, 1440);
}

#[test]
fn test_controller_grouping() {
    let mut seq = seq_120(2.0);
    seq.notes.push(note(0.0, 0.5, 60));
    seq.control_changes = vec![cc(0.0, 64, 127), cc(0.25, 7, 100), cc(1.0, 64, 0)];

    let doc = convert(&seq).unwrap();
    let track = &doc.tracks[0];
    let sustain = &track.control_changes[&64];
    assert_eq!(sustain.len(), 2);
    assert_eq!(sustain[0].value, 1.0);
    assert_eq!(sustain[1].ticks, 960);
    assert_eq!(sustain[1].value, 0.0);
    assert_eq!(sustain[1].time, 1.0);
    assert_eq!(track.control_changes[&7][0].number, 7);
    // A controller event past the last note extends the track
    assert_eq!(track.end_of_track_ticks, 960);
}

#[test]
fn test_velocity_normalized() {
    let mut seq = seq_120(1.0);
    let mut soft = note(0.0, 0.5, 60);
    soft.velocity = 0;
    seq.notes.push(soft);

    let doc = convert(&seq).unwrap();
    assert_eq!(doc.tracks[0].notes[0].velocity, 0.0);
}

#[test]
fn test_project_tempos_preserves_order() {
    let mut seq = seq_120(3.0);
    seq.tempos.push(Tempo { time: 1.0, qpm: 60.0 });
    seq.tempos.push(Tempo { time: 2.0, qpm: 60.0 });
    let curve = crate::TempoCurve::build(&seq.tempos, seq.ticks_per_quarter);

    let tempos = project_tempos(&seq, &curve);
    let ticks: Vec<u64> = tempos.iter().map(|t| t.ticks).collect();
    assert_eq!(ticks, vec![0, 960, 1440]);
}

#[test]
fn test_assemble_header_shape() {
    let projection = Projection {
        tempos: vec![TempoEvent {
            ticks: 0,
            bpm: 90.0,
        }],
        time_signatures: Vec::new(),
        key_signatures: Vec::new(),
        tracks: Vec::new(),
    };
    let doc = assemble(projection, 96, "");
    let value: serde_json::Value = serde_json::from_str(&doc.to_json()).unwrap();
    assert_eq!(value["header"]["ppq"], 96);
    assert_eq!(value["header"]["name"], "");
    assert_eq!(value["header"]["meta"], serde_json::json!([]));
    assert_eq!(value["header"]["tempos"][0]["bpm"], 90.0);
    assert_eq!(value["tracks"], serde_json::json!([]));
}

#[test]
fn test_note_far_past_horizon() {
    let mut seq = seq_120(0.0);
    seq.notes.push(note(1e300, 2e300, 60));

    let doc = convert(&seq).unwrap();
    let track = &doc.tracks[0];
    assert_eq!(track.notes[0].ticks, u64::MAX);
    assert_eq!(track.notes[0].duration_ticks, u64::MAX);
    assert_eq!(track.end_of_track_ticks, u64::MAX);
}

#[test]
fn test_key_signature_outside_table() {
    let mut seq = seq_120(1.0);
    seq.key_signatures.push(KeySignature {
        time: 0.0,
        key: 12,
        mode: 0,
    });
    let curve = crate::TempoCurve::build(&seq.tempos, seq.ticks_per_quarter);
    let map = crate::TickTimeMap::build(&curve, curve.horizon(1.0));

    match project_key_signatures(&seq, &map) {
        Err(ConvertError::InvalidSequence { field, .. }) => {
            assert_eq!(field, "keySignatures[0].key")
        }
        other => panic!("Expected InvalidSequence but got: {:?}", other),
    }
}

#[test]
fn test_track_limit_checked_before_layout() {
    let mut seq = seq_120(1.0);
    let mut n = note(0.0, 0.5, 60);
    n.instrument_track = u32::MAX;
    seq.notes.push(n);
    assert_eq!(track_count(&seq), u32::MAX as u64 + 1);

    let curve = crate::TempoCurve::build(&seq.tempos, seq.ticks_per_quarter);
    let map = crate::TickTimeMap::build(&curve, curve.horizon(1.0));
    assert!(matches!(
        project_tracks(&seq, &map, Some(16)),
        Err(ConvertError::TooManyTracks { limit: 16, .. })
    ));
}
