use super::error::MatchError;
use super::event::MatchEvent;
use std::io::BufRead;
use std::io::Write;
use std::path::Path;

/// Write an event stream as UTF-8 JSONL: one event per line, LF
/// terminated, no blank lines, no trailing data.
pub fn write_journal(path: &Path, events: &[MatchEvent]) -> Result<(), MatchError> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    for event in events {
        serde_json::to_writer(&mut writer, event)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a JSONL event stream back. Lenient about a trailing newline,
/// strict about everything else.
pub fn read_journal(path: &Path) -> Result<Vec<MatchEvent>, MatchError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let mut events = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        events.push(serde_json::from_str(&line)?);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::super::orchestrator::run_match;
    use super::super::orchestrator::MatchOptions;
    use super::*;
    use crate::agent::Agent;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("gauntlet-{}-{}.jsonl", name, uuid::Uuid::now_v7()))
    }

    #[tokio::test]
    async fn journal_round_trips_a_match() {
        let game = Counting::rounds(2);
        let mut a = Scripted::new("a", vec![1, 3]);
        let mut b = Scripted::new("b", vec![2, 2]);
        let mut seats: [&mut dyn Agent<Counting>; 2] = [&mut a, &mut b];
        let report = run_match(&game, &mut seats, MatchOptions::seeded("journal"))
            .await
            .unwrap();
        let path = scratch("round-trip");
        write_journal(&path, &report.events).unwrap();
        let back = read_journal(&path).unwrap();
        assert_eq!(back, report.events);
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn journal_is_one_event_per_lf_line() {
        let game = Counting::rounds(1);
        let mut a = Scripted::new("a", vec![1]);
        let mut b = Scripted::new("b", vec![1]);
        let mut seats: [&mut dyn Agent<Counting>; 2] = [&mut a, &mut b];
        let report = run_match(&game, &mut seats, MatchOptions::seeded("lines"))
            .await
            .unwrap();
        let path = scratch("lines");
        write_journal(&path, &report.events).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.ends_with('\n'));
        assert!(!raw.contains("\r\n"));
        let lines = raw.lines().collect::<Vec<&str>>();
        assert_eq!(lines.len(), report.events.len());
        assert!(lines.iter().all(|l| !l.trim().is_empty()));
        std::fs::remove_file(&path).unwrap();
    }
}
