use crate::combat::CombatExtraSpellAction;
use crate::timeline::spell_icon_url;

use super::{ReplayEventSpellInfo, SpellDirection};

/// A dispel: the caster's spell removing an aura from the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayDispelEvent {
    pub timestamp: i64,
    pub spell_info: ReplayEventSpellInfo,
    /// `"and dispelled"`, expanded rows only
    pub connector: Option<&'static str>,
    pub dispelled_spell_icon: String,
    /// Expanded rows only
    pub dispelled_spell_name: Option<String>,
}

impl ReplayDispelEvent {
    pub fn new(event: &CombatExtraSpellAction, expanded: bool) -> Self {
        Self {
            timestamp: event.timestamp,
            spell_info: ReplayEventSpellInfo::new(event, SpellDirection::Remove, expanded),
            connector: expanded.then_some("and dispelled"),
            dispelled_spell_icon: spell_icon_url(
                event
                    .extra_spell_id
                    .as_deref()
                    .filter(|id| !id.is_empty())
                    .unwrap_or("0"),
            ),
            dispelled_spell_name: event.extra_spell_name.clone().filter(|_| expanded),
        }
    }

    pub fn describe(&self) -> String {
        let mut line = self.spell_info.describe();
        if let Some(connector) = self.connector {
            line.push(' ');
            line.push_str(connector);
        }
        if let Some(name) = &self.dispelled_spell_name {
            line.push(' ');
            line.push_str(name);
        }
        line
    }
}
