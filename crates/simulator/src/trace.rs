//! Touch trace files
//!
//! One event per line:
//!
//! ```text
//! # comment
//! <t_ms> <0|1> <x> <y>     touch poll: finger up (0) or down (1) at x,y
//! type <text>              append text to the on-screen keyboard
//! ```
//!
//! The point of a finger-up line is ignored; the release is reported where
//! the finger was last seen, the way the touch controller does.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use embedded_graphics::prelude::Point;

/// One replayed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// Touch panel poll
    Touch {
        now_ms: u64,
        pressed: bool,
        point: Point,
    },
    /// Text typed on the keyboard
    Type(String),
}

pub fn load(path: &Path) -> Result<Vec<TraceEvent>> {
    let source =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse(&source).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse(source: &str) -> Result<Vec<TraceEvent>> {
    let mut events = Vec::new();
    let mut last_ms = 0;

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(text) = line.strip_prefix("type ") {
            events.push(TraceEvent::Type(text.to_owned()));
            continue;
        }

        let event = parse_touch(line).with_context(|| format!("line {line_no}: {line:?}"))?;
        if let TraceEvent::Touch { now_ms, .. } = event {
            if now_ms < last_ms {
                bail!("line {line_no}: time goes backwards ({now_ms} ms after {last_ms} ms)");
            }
            last_ms = now_ms;
        }
        events.push(event);
    }

    Ok(events)
}

fn parse_touch(line: &str) -> Result<TraceEvent> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [t, pressed, x, y] = fields.as_slice() else {
        bail!("expected `t_ms pressed x y`, got {} fields", fields.len());
    };
    let pressed = match *pressed {
        "0" => false,
        "1" => true,
        other => bail!("pressed must be 0 or 1, got {other:?}"),
    };
    Ok(TraceEvent::Touch {
        now_ms: t.parse().context("bad timestamp")?,
        pressed,
        point: Point::new(x.parse().context("bad x")?, y.parse().context("bad y")?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_touch_and_type_lines() {
        let events = parse(
            "# tap the chat icon\n\
             0 1 30 50\n\
             \n\
             80 0 30 50\n\
             type hello there\n",
        )
        .unwrap();
        assert_eq!(
            events,
            [
                TraceEvent::Touch {
                    now_ms: 0,
                    pressed: true,
                    point: Point::new(30, 50)
                },
                TraceEvent::Touch {
                    now_ms: 80,
                    pressed: false,
                    point: Point::new(30, 50)
                },
                TraceEvent::Type("hello there".into()),
            ]
        );
    }

    #[test]
    fn test_negative_coordinates_are_allowed() {
        let events = parse("5 1 -4 250").unwrap();
        assert_eq!(
            events,
            [TraceEvent::Touch {
                now_ms: 5,
                pressed: true,
                point: Point::new(-4, 250)
            }]
        );
    }

    #[test]
    fn test_errors_name_the_line() {
        let err = parse("0 1 30 50\n10 2 30 50").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));

        let err = parse("0 1 30").unwrap_err();
        assert!(format!("{err:#}").contains("got 3 fields"));
    }

    #[test]
    fn test_time_must_not_go_backwards() {
        let err = parse("100 1 0 0\n50 0 0 0").unwrap_err();
        assert!(err.to_string().contains("time goes backwards"));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.trace")).unwrap_err();
        assert!(err.to_string().contains("missing.trace"));
    }
}
