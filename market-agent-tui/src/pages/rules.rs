//! Rules — read-only table of configured rules.

use market_agent_core::Rule;

use super::Remote;

#[derive(Debug, Clone)]
pub struct RulesState {
    pub rules: Remote<Vec<Rule>>,
    pub scroll: usize,
}

impl Default for RulesState {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesState {
    pub fn new() -> Self {
        Self {
            rules: Remote::Loading,
            scroll: 0,
        }
    }

    pub fn scroll_down(&mut self) {
        let n = self.rules.ready().map_or(0, Vec::len);
        if self.scroll + 1 < n {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

/// Display cells for one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRow {
    pub id: String,
    pub kind: String,
    pub enabled: &'static str,
    pub params: String,
    pub notify: String,
}

impl RuleRow {
    pub fn from_rule(rule: &Rule) -> Self {
        let notify = match &rule.notify {
            Some(n) => match n.min_score {
                Some(min) => format!("{} ≥ {min}", n.channel),
                None => n.channel.clone(),
            },
            None => "—".to_string(),
        };
        Self {
            id: rule.id.clone(),
            kind: rule.kind.clone(),
            enabled: if rule.enabled { "Yes" } else { "No" },
            params: rule.params_json(),
            notify,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_agent_core::Notify;
    use serde_json::json;

    #[test]
    fn ma_cross_row() {
        let rule: Rule = serde_json::from_value(json!({
            "id": "r1", "kind": "ma-cross", "enabled": true, "params": { "window": 20 }
        }))
        .unwrap();
        let row = RuleRow::from_rule(&rule);
        assert_eq!(row.id, "r1");
        assert_eq!(row.kind, "ma-cross");
        assert_eq!(row.enabled, "Yes");
        assert_eq!(row.params, r#"{"window":20}"#);
        assert_eq!(row.notify, "—");
    }

    #[test]
    fn disabled_with_notify() {
        let rule = Rule {
            id: "momentum_breakout".into(),
            kind: "breakout".into(),
            enabled: false,
            params: Default::default(),
            notify: Some(Notify {
                channel: "telegram".into(),
                min_score: Some(0.7),
            }),
        };
        let row = RuleRow::from_rule(&rule);
        assert_eq!(row.enabled, "No");
        assert_eq!(row.notify, "telegram ≥ 0.7");
    }

    fn enabled(id: &str) -> Rule {
        Rule {
            id: id.into(),
            kind: "k".into(),
            enabled: true,
            params: Default::default(),
            notify: None,
        }
    }

    #[test]
    fn scroll_is_clamped() {
        let mut s = RulesState::new();
        s.scroll_down();
        assert_eq!(s.scroll, 0);
        s.rules = Remote::Ready(vec![enabled("a"), enabled("b")]);
        s.scroll_down();
        s.scroll_down();
        assert_eq!(s.scroll, 1);
        s.scroll_up();
        s.scroll_up();
        assert_eq!(s.scroll, 0);
    }
}
