// LogExplorer - core/filter.rs
//
// Preset + keyword filter engine for grouped log entries.
// The preset stage and the keyword stage are AND-combined.
// Every test is a case-insensitive substring test on the entry's joined text.
// Core layer: pure logic, no I/O.

use crate::core::model::{Combinator, FilterSpec, LogEntry};

/// Lower-cased keyword stage, prepared once per filter call.
#[derive(Debug)]
struct KeywordStage {
    keyword1: String,
    keyword2: String,
    combinator: Combinator,
}

impl KeywordStage {
    /// Returns `None` when the stage is inactive for this spec.
    fn prepare(spec: &FilterSpec) -> Option<Self> {
        if spec.keyword1.is_empty() && spec.keyword2.is_empty() {
            return None;
        }
        // NOT needs both terms; with either missing it filters nothing.
        if spec.combinator == Combinator::Not
            && (spec.keyword1.is_empty() || spec.keyword2.is_empty())
        {
            return None;
        }
        // NONE with only keyword2 set has nothing to test.
        if spec.combinator == Combinator::None && spec.keyword1.is_empty() {
            return None;
        }
        Some(Self {
            keyword1: spec.keyword1.to_lowercase(),
            keyword2: spec.keyword2.to_lowercase(),
            combinator: spec.combinator,
        })
    }

    fn matches(&self, text_lower: &str) -> bool {
        let has1 = text_lower.contains(self.keyword1.as_str());
        let has2 = text_lower.contains(self.keyword2.as_str());
        match self.combinator {
            Combinator::And => has1 && has2,
            Combinator::Or => has1 || has2,
            Combinator::Not => has1 && !has2,
            Combinator::None => has1,
        }
    }
}

/// Apply `spec` to `entries`, returning the retained entries in file order.
///
/// The result is an order-preserving subsequence of `entries`; nothing is
/// copied, reordered, or duplicated.
pub fn filter_entries<'a>(entries: &'a [LogEntry], spec: &FilterSpec) -> Vec<&'a LogEntry> {
    if spec.is_empty() {
        return entries.iter().collect();
    }

    let preset_terms: Vec<&str> = spec
        .preset
        .as_ref()
        .map(|p| p.terms())
        .unwrap_or_default();
    let keywords = KeywordStage::prepare(spec);

    if preset_terms.is_empty() && keywords.is_none() {
        return entries.iter().collect();
    }

    let retained: Vec<&LogEntry> = entries
        .iter()
        .filter(|entry| {
            let text_lower = entry.text().to_lowercase();
            let preset_ok =
                preset_terms.is_empty() || preset_terms.iter().any(|t| text_lower.contains(*t));
            preset_ok && keywords.as_ref().map_or(true, |k| k.matches(&text_lower))
        })
        .collect();

    tracing::debug!(
        preset = ?spec.preset.as_ref().map(ToString::to_string),
        combinator = %spec.combinator,
        total = entries.len(),
        retained = retained.len(),
        "Filter applied"
    );
    retained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Preset;

    fn entry(text: &str) -> LogEntry {
        LogEntry::new(text.lines().map(str::to_string).collect())
    }

    fn keywords(k1: &str, k2: &str, combinator: Combinator) -> FilterSpec {
        FilterSpec {
            keyword1: k1.to_string(),
            keyword2: k2.to_string(),
            combinator,
            ..Default::default()
        }
    }

    fn texts(result: &[&LogEntry]) -> Vec<String> {
        result.iter().map(|e| e.text()).collect()
    }

    #[test]
    fn test_empty_spec_returns_all() {
        let entries = vec![entry("a"), entry("b")];
        let result = filter_entries(&entries, &FilterSpec::default());
        assert_eq!(texts(&result), vec!["a", "b"]);
    }

    #[test]
    fn test_network_preset_matches_any_term() {
        let entries = vec![
            entry("Http 200"),
            entry("Nothing relevant"),
            entry("socket closed by peer"),
        ];
        let spec = FilterSpec {
            preset: Preset::parse("network"),
            ..Default::default()
        };
        let result = filter_entries(&entries, &spec);
        assert_eq!(texts(&result), vec!["Http 200", "socket closed by peer"]);
    }

    #[test]
    fn test_preset_matches_continuation_lines() {
        let entries = vec![
            entry("2024-01-01 00:00:00.000 Error Failed\n   at Foo()\nSystem.NullReferenceException"),
            entry("2024-01-01 00:00:01.000 Info fine"),
        ];
        let spec = FilterSpec {
            preset: Preset::parse("exception"),
            ..Default::default()
        };
        assert_eq!(filter_entries(&entries, &spec).len(), 1);
    }

    #[test]
    fn test_plugin_preset_uses_name_case_insensitively() {
        let entries = vec![entry("Info Trakt: scrobbled"), entry("Info Other: noop")];
        let spec = FilterSpec {
            preset: Preset::parse("plugin:TRAKT"),
            ..Default::default()
        };
        assert_eq!(texts(&filter_entries(&entries, &spec)), vec!["Info Trakt: scrobbled"]);
    }

    #[test]
    fn test_stale_plugin_name_yields_no_matches() {
        let entries = vec![entry("Info Trakt: scrobbled")];
        let spec = FilterSpec {
            preset: Preset::parse("plugin:Uninstalled"),
            ..Default::default()
        };
        assert!(filter_entries(&entries, &spec).is_empty());
    }

    #[test]
    fn test_unrecognized_preset_is_noop() {
        let entries = vec![entry("a"), entry("b")];
        let spec = FilterSpec {
            preset: Preset::parse("bogus"),
            ..Default::default()
        };
        assert_eq!(filter_entries(&entries, &spec).len(), 2);
    }

    #[test]
    fn test_and_requires_both() {
        let entries = vec![entry("fail timeout"), entry("fail only"), entry("TIMEOUT only")];
        let result = filter_entries(&entries, &keywords("FAIL", "timeout", Combinator::And));
        assert_eq!(texts(&result), vec!["fail timeout"]);
    }

    #[test]
    fn test_and_with_empty_keyword2_tests_keyword1_only() {
        let entries = vec![entry("fail"), entry("ok")];
        let result = filter_entries(&entries, &keywords("fail", "", Combinator::And));
        assert_eq!(texts(&result), vec!["fail"]);
    }

    #[test]
    fn test_or_accepts_either() {
        let entries = vec![entry("alpha"), entry("beta"), entry("gamma")];
        let result = filter_entries(&entries, &keywords("alpha", "BETA", Combinator::Or));
        assert_eq!(texts(&result), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_or_with_empty_keyword_matches_everything() {
        let entries = vec![entry("alpha"), entry("beta")];
        let result = filter_entries(&entries, &keywords("", "beta", Combinator::Or));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_not_excludes_keyword2() {
        let entries = vec![
            entry("request fail: timeout"),
            entry("request fail: refused"),
            entry("request ok"),
        ];
        let result = filter_entries(&entries, &keywords("fail", "timeout", Combinator::Not));
        assert_eq!(texts(&result), vec!["request fail: refused"]);
    }

    #[test]
    fn test_not_with_empty_keyword2_is_noop() {
        let entries = vec![entry("fail"), entry("ok")];
        let result = filter_entries(&entries, &keywords("fail", "", Combinator::Not));
        assert_eq!(texts(&result), vec!["fail", "ok"]);
    }

    #[test]
    fn test_none_uses_keyword1_only() {
        let entries = vec![entry("fail"), entry("ok")];
        assert_eq!(
            texts(&filter_entries(&entries, &keywords("fail", "ok", Combinator::None))),
            vec!["fail"]
        );
        assert_eq!(
            filter_entries(&entries, &keywords("", "ok", Combinator::None)).len(),
            2
        );
    }

    #[test]
    fn test_stages_intersect() {
        let entries = vec![
            entry("Playback started for item 1"),
            entry("Playback failed for item 2"),
            entry("Transcode failed"),
        ];
        let spec = FilterSpec {
            preset: Preset::parse("playback"),
            keyword1: "failed".to_string(),
            ..Default::default()
        };
        assert_eq!(
            texts(&filter_entries(&entries, &spec)),
            vec!["Playback failed for item 2"]
        );
    }

    #[test]
    fn test_output_preserves_order_without_duplicates() {
        let entries: Vec<LogEntry> = (0..20)
            .map(|i| entry(&format!("entry {i} {}", if i % 3 == 0 { "hit" } else { "miss" })))
            .collect();
        let result = filter_entries(&entries, &keywords("hit", "", Combinator::None));
        let positions: Vec<usize> = result
            .iter()
            .map(|r| entries.iter().position(|e| std::ptr::eq(e, *r)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(positions, vec![0, 3, 6, 9, 12, 15, 18]);
    }
}
