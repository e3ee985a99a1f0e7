//! Event rows of the combat replay timeline.

mod dispel;

pub use dispel::ReplayDispelEvent;

use crate::combat::CombatExtraSpellAction;
use crate::timeline::spell_icon_url;

/// Which way a spell event acts on its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpellDirection {
    #[default]
    Apply,
    Remove,
}

impl SpellDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Apply => "->",
            Self::Remove => "-x",
        }
    }
}

/// Caster, spell and target of a replay event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayEventSpellInfo {
    pub src_unit_id: String,
    pub src_unit_name: String,
    pub dest_unit_id: String,
    pub dest_unit_name: String,
    pub direction: SpellDirection,
    pub spell_icon: String,
    /// Only filled for expanded rows
    pub spell_name: Option<String>,
}

impl ReplayEventSpellInfo {
    pub fn new(event: &CombatExtraSpellAction, direction: SpellDirection, expanded: bool) -> Self {
        Self {
            src_unit_id: event.src_unit_id.clone(),
            src_unit_name: event.src_unit_name.clone(),
            dest_unit_id: event.dest_unit_id.clone(),
            dest_unit_name: event.dest_unit_name.clone(),
            direction,
            spell_icon: spell_icon_url(event.spell_id.as_deref().unwrap_or("0")),
            spell_name: event.spell_name.clone().filter(|_| expanded),
        }
    }

    pub fn describe(&self) -> String {
        match &self.spell_name {
            Some(spell) => format!(
                "{} {} {} {}",
                self.src_unit_name,
                spell,
                self.direction.arrow(),
                self.dest_unit_name
            ),
            None => format!("{} {} {}", self.src_unit_name, self.direction.arrow(), self.dest_unit_name),
        }
    }
}
