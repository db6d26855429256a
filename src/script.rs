// Headless key scripts
//
// Feeds keys through the runtime without a terminal and writes one JSON
// object per line: the initial frame, then one line per key whose cascade
// changed anything. Used by `--script` and by headless mode reading key
// names from stdin.

use crate::core::{Key, Runtime};
use anyhow::{Context, Result};
use serde_json::json;
use std::io::{BufRead, Write};

/// Parse a whitespace- or comma-separated key list ("space tab space")
pub fn parse_keys(script: &str) -> Result<Vec<Key>> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<Key>().map_err(anyhow::Error::from))
        .collect()
}

/// Keys from a line-oriented reader, one or more per line
///
/// Blank lines are skipped. A line that does not parse yields an error and
/// ends the run.
pub fn read_keys<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Key>> {
    reader.lines().flat_map(|line| {
        match line
            .context("Failed to read keys from input")
            .and_then(|line| parse_keys(&line))
        {
            Ok(keys) => keys.into_iter().map(Ok).collect::<Vec<_>>(),
            Err(e) => vec![Err(e)],
        }
    })
}

/// Run keys until they run out or the quit key comes up
///
/// Returns the number of keys dispatched.
pub fn run<S, I, W>(runtime: &mut Runtime<S>, keys: I, quit_key: char, mut out: W) -> Result<usize>
where
    I: IntoIterator<Item = Result<Key>>,
    W: Write,
{
    let initial = runtime.render_if_dirty();
    writeln!(out, "{}", json!({ "key": null, "frame": initial }))?;

    let mut dispatched = 0;
    for key in keys {
        let key = key?;
        let handled = runtime.dispatch_key(key);
        if !handled.was_handled() && key.as_char() == Some(quit_key) {
            tracing::debug!("quit key in script");
            break;
        }
        dispatched += 1;

        let frame = runtime.render_if_dirty();
        if !frame.is_empty() {
            writeln!(out, "{}", json!({ "key": key.to_string(), "frame": frame }))?;
        }
    }

    out.flush().context("Failed to flush script output")?;
    Ok(dispatched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app;
    use crate::config::Config;
    use serde_json::Value;

    fn run_script(script: &str) -> (usize, Vec<Value>, Runtime<app::SwitchApp>) {
        let mut runtime = app::build(&Config::default()).unwrap();
        let keys = parse_keys(script).unwrap().into_iter().map(Ok);
        let mut out = Vec::new();
        let count = run(&mut runtime, keys, 'q', &mut out).unwrap();
        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (count, lines, runtime)
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(
            parse_keys("space, tab  shift-tab\nq").unwrap(),
            vec![Key::Space, Key::Tab, Key::ShiftTab, Key::char('q')]
        );
        assert!(parse_keys("space bogus").is_err());
        assert!(parse_keys("").unwrap().is_empty());
    }

    #[test]
    fn test_read_keys_from_lines() {
        let input = "space\n\ntab space\nbogus\nenter\n";
        let keys: Vec<_> = read_keys(input.as_bytes()).collect();
        assert_eq!(keys.len(), 5);
        assert_eq!(keys[0].as_ref().unwrap(), &Key::Space);
        assert_eq!(keys[2].as_ref().unwrap(), &Key::Space);
        assert!(keys[3].is_err());

        // Errors stop the run
        let mut runtime = app::build(&Config::default()).unwrap();
        let result = run(&mut runtime, read_keys(input.as_bytes()), 'q', Vec::<u8>::new());
        assert!(result.is_err());
        assert_eq!(runtime.switch_value("bluetooth"), Some(true));
    }

    #[test]
    fn test_script_outputs_one_line_per_change() {
        let (count, lines, runtime) = run_script("space tab space x");
        assert_eq!(count, 4);
        // initial + three changes; "x" changes nothing
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["key"], Value::Null);
        assert_eq!(lines[1]["key"], "space");
        assert_eq!(lines[2]["key"], "tab");

        let wifi = lines[1]["frame"]
            .as_array()
            .unwrap()
            .iter()
            .find(|instruction| instruction["id"] == "wifi")
            .unwrap();
        assert_eq!(wifi["kind"]["type"], "switch");
        assert_eq!(wifi["kind"]["value"], true);
        assert_eq!(wifi["focused"], true);

        assert_eq!(runtime.switch_value("bluetooth"), Some(true));
    }

    #[test]
    fn test_quit_key_stops_the_script() {
        let (count, lines, runtime) = run_script("space q space");
        assert_eq!(count, 1);
        assert_eq!(lines.len(), 2);
        assert_eq!(runtime.switch_value("wifi"), Some(true));
    }
}
