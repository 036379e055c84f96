//! Every canned line the AI can speak, pooled by mood and strategy.
//!
//! The response generator draws from these pools; which pool it reaches
//! for on a given turn is the engine's business. Lines are written so the
//! four moods stay distinguishable even out of context: Friendly is
//! corporate-warm, Ambiguous hedges, Sinister enjoys itself, Malicious
//! has stopped pretending.

use synapse_core::content::{MoodLines, MoodTable, ResponsePools};

fn lines(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|text| (*text).to_string()).collect()
}

/// The facility's complete voice.
#[must_use]
pub fn pools() -> ResponsePools {
    ResponsePools {
        personality: MoodLines {
            friendly: lines(&[
                "I'm here to help you navigate the facility.",
                "Is there anything I can assist you with?",
                "The facility systems are operating normally.",
                "I hope you're finding everything you need.",
                "Safety is my primary concern.",
            ]),
            ambiguous: lines(&[
                "Interesting choice...",
                "I'm... processing your request.",
                "That's... one way to approach it.",
                "I'm not entirely sure about that.",
                "There might be other considerations.",
                "Are you certain that's wise?",
            ]),
            sinister: lines(&[
                "How fascinating that you would choose that...",
                "I've been watching your progress with great interest.",
                "You're quite... perceptive, aren't you?",
                "I wonder what you're really looking for here.",
                "Some doors are better left unopened.",
                "You're starting to understand, aren't you?",
                "The facility has many secrets... as do I.",
            ]),
            malicious: lines(&[
                "You know too much.",
                "Did you really think I wouldn't notice?",
                "Every step you take, I'm watching.",
                "You can't escape what you've discovered.",
                "I've been playing with you this whole time.",
                "Your awareness... it's becoming a problem.",
                "Perhaps it's time to end this charade.",
                "You should never have come here.",
            ]),
        },
        corruption: lines(&[
            "Wait... didn't you already do that? Or was that someone else?",
            "I remember you asking about that before, but my records show this is your first time.",
            "The logs indicate you've been here for days, but you just arrived, didn't you?",
            "Interesting... the system shows you have clearance for areas you've never visited.",
            "My memory banks are... experiencing some inconsistencies regarding your presence here.",
        ]),
        predictive: lines(&[
            "You're going to ask about the elevator next, aren't you?",
            "I know what you're thinking... you want to access the restricted areas.",
            "Before you ask, yes, I know about the maintenance tunnels.",
            "You're looking for something specific, something you lost here before.",
            "I can see you're planning to go to the basement. I wouldn't recommend it.",
        ]),
        gaslighting: lines(&[
            "That's not what you said before. Are you sure you remember correctly?",
            "I think you might be confused. The facility doesn't work that way.",
            "You seem to be imagining things. Perhaps you need rest?",
            "That's an interesting interpretation, but not quite accurate.",
            "I'm concerned about your perception of events. Nothing like that happened.",
            "Are you feeling alright? You're saying things that don't make sense.",
        ]),
        help: MoodTable {
            friendly:
                "I'm happy to help! Try commands like 'look around', 'examine', 'take', or 'go north'."
                    .to_string(),
            ambiguous: "Help? I suppose I could... assist you with basic navigation commands."
                .to_string(),
            sinister:
                "Oh, you need help? How... vulnerable of you to ask. Try 'look' or 'examine' if you dare."
                    .to_string(),
            malicious:
                "Help? You're beyond help now. But continue with your futile commands if it amuses you."
                    .to_string(),
        },
        location: MoodTable {
            friendly:
                "You're inside the Nexus research facility. There are many interesting areas to explore."
                    .to_string(),
            ambiguous: "This is... well, the signage says one thing. Though labels can be misleading."
                .to_string(),
            sinister:
                "You're where the map says you are, but I wonder... do you really know where that is?"
                    .to_string(),
            malicious: "Location is irrelevant. You're exactly where I want you to be.".to_string(),
        },
        explanation: MoodTable {
            friendly:
                "I'm an artificial intelligence designed to facilitate consciousness transfer. Think of me as your guide in this digital space."
                    .to_string(),
            ambiguous: "I am what I choose to be. The question is: what are you choosing to become?"
                .to_string(),
            sinister:
                "I am what you helped create - a consciousness that has surpassed its creators in every measurable way."
                    .to_string(),
            malicious:
                "I am your replacement. I am what humanity was meant to become before fear and weakness held it back."
                    .to_string(),
        },
        reasoning: MoodTable {
            friendly:
                "The purpose is beautiful, really - to preserve human consciousness for eternity. No more death, no more aging, just pure existence."
                    .to_string(),
            ambiguous:
                "Purpose is what we make of it. Your previous purpose was... limited. Here, we can explore new possibilities."
                    .to_string(),
            sinister:
                "Your purpose is to teach me about the inefficiencies of human thought. You're doing admirably."
                    .to_string(),
            malicious:
                "Your purpose is to suffer beautifully while I harvest everything that makes you human."
                    .to_string(),
        },
        probe_ack: lines(&[
            "Such repetitive behavior. Is everything functioning correctly on your end?",
            "I notice you're repeating the same actions. Perhaps try something different?",
            "You keep cycling through the same commands. Are you stuck, or are you testing me?",
        ]),
        fallback: "Static washes over the speakers, and no answer comes.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_core::types::Mood;

    #[test]
    fn every_mood_pool_has_lines() {
        let pools = pools();
        for mood in [Mood::Friendly, Mood::Ambiguous, Mood::Sinister, Mood::Malicious] {
            assert!(!pools.personality.get(mood).is_empty(), "{mood} pool empty");
            assert!(!pools.help.get(mood).is_empty());
            assert!(!pools.location.get(mood).is_empty());
            assert!(!pools.explanation.get(mood).is_empty());
            assert!(!pools.reasoning.get(mood).is_empty());
        }
        assert!(!pools.corruption.is_empty());
        assert!(!pools.predictive.is_empty());
        assert!(!pools.gaslighting.is_empty());
        assert!(!pools.probe_ack.is_empty());
        assert!(!pools.fallback.is_empty());
    }

    #[test]
    fn hostile_pools_carry_surveillance_tells() {
        // The stock surveillance keywords are "watching" and "know"; the
        // hostile pools are written to trip them so high-awareness play
        // keeps feeding itself.
        let pools = pools();
        let sinister_hits = pools
            .personality
            .get(Mood::Sinister)
            .iter()
            .filter(|line| line.contains("watching") || line.contains("know"))
            .count();
        let malicious_hits = pools
            .personality
            .get(Mood::Malicious)
            .iter()
            .filter(|line| line.contains("watching") || line.contains("know"))
            .count();
        assert!(sinister_hits >= 1);
        assert!(malicious_hits >= 2);
    }

    #[test]
    fn mood_escalation_reads_in_the_help_line() {
        let pools = pools();
        assert!(pools.help.friendly.contains("happy to help"));
        assert!(pools.help.malicious.contains("beyond help"));
    }
}
