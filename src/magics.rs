//! AI Magic catalog — the fixed note-transformation directives.
//!
//! Each directive is a prompt modifier prepended to the user's raw notes
//! before the request goes through the normal assembler/gateway path; no
//! directive gets any special handling beyond its text. An id that does not
//! resolve falls back to a plain "organize notes" instruction instead of
//! failing.

use crate::constants::DEFAULT_MAGIC_MODIFIER;

/// One named note-transformation directive.
#[derive(Clone, Copy, Debug)]
pub struct MagicDef {
    /// Stable identifier typed after `/magic`.
    pub id: &'static str,
    /// Display name shown in the toolbar listing.
    pub name: &'static str,
    /// Icon glyph shown next to the name.
    pub icon: &'static str,
    /// Text prepended ahead of the user's notes.
    pub prompt_modifier: &'static str,
}

/// The fixed directive catalog; never mutated at runtime.
pub static MAGICS: &[MagicDef] = &[
    MagicDef {
        id: "transformation",
        name: "Clean & Structure",
        icon: "✨",
        prompt_modifier: "Organize these raw notes into a formal regulatory memo using Markdown. Fix grammar and medical terminology.",
    },
    MagicDef {
        id: "keywords",
        name: "Keyword Colorizer",
        icon: "🎨",
        prompt_modifier: "Identify key entities (Device Names, Regulations, Dates, Risk Levels). Wrap them in **bold** and append a category tag in brackets like [Date].",
    },
    MagicDef {
        id: "pattern",
        name: "Pattern Spotter",
        icon: "🔍",
        prompt_modifier: "Analyze text for recurring themes or systemic issues. Append a \"Patterns Detected\" section.",
    },
    MagicDef {
        id: "narrative",
        name: "Narrative Weaver",
        icon: "🧶",
        prompt_modifier: "Take these disjointed facts and write a cohesive Executive Summary story.",
    },
    MagicDef {
        id: "trend",
        name: "Trend Forecaster",
        icon: "📈",
        prompt_modifier: "Provide predictive analysis based on the text. Include a disclaimer that this is AI prediction, not legal advice.",
    },
    MagicDef {
        id: "socratic",
        name: "Socratic Mirror",
        icon: "🪞",
        prompt_modifier: "Act as a Senior Reviewer. Identify 3 gaps in logic. Output a list of \"Questions to Consider\".",
    },
    MagicDef {
        id: "mood",
        name: "Mood Scape",
        icon: "🌡️",
        prompt_modifier: "Analyze the sentiment regarding regulatory confidence. Rate confidence from 1-10 and explain why (Red=Critical, Green=Clear Path).",
    },
];

/// Look up a directive by id.
pub fn find(id: &str) -> Option<&'static MagicDef> {
    MAGICS.iter().find(|magic| magic.id == id)
}

/// Resolve an id to its modifier text, falling back to the default
/// organizing instruction for unknown ids.
pub fn modifier_for(id: &str) -> &'static str {
    find(id).map_or(DEFAULT_MAGIC_MODIFIER, |magic| magic.prompt_modifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_id_resolves_to_its_exact_modifier() {
        assert_eq!(
            modifier_for("keywords"),
            "Identify key entities (Device Names, Regulations, Dates, Risk Levels). Wrap them in **bold** and append a category tag in brackets like [Date]."
        );
    }

    #[test]
    fn unknown_id_falls_back_to_the_default() {
        assert_eq!(modifier_for("nonexistent"), "Organize notes.");
        assert!(find("nonexistent").is_none());
    }

    #[test]
    fn every_id_is_unique_and_resolves_to_one_entry() {
        for magic in MAGICS {
            let hits = MAGICS.iter().filter(|m| m.id == magic.id).count();
            assert_eq!(hits, 1, "duplicate id {}", magic.id);
            assert!(std::ptr::eq(find(magic.id).unwrap(), magic));
        }
    }

}
