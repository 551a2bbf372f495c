//! Fixed Question Catalog
//!
//! The science and English questions the odd-hash branch indexes into.
//! Entries are static; `question_for` clones one out as a `Question`.

use crate::model::{Question, Subject};

struct CatalogEntry {
    id: &'static str,
    text: &'static str,
    options: [&'static str; 4],
    correct_index: usize,
    hint: &'static str,
    fun_fact: &'static str,
    subject: Subject,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "sci-photosynthesis",
        text: "What do plants need to make their own food through photosynthesis?",
        options: [
            "Sunlight, water, and carbon dioxide",
            "Soil, wind, and moonlight",
            "Sugar, salt, and oxygen",
            "Rocks, sand, and rain",
        ],
        correct_index: 0,
        hint: "Two of the three come from the air and the sky.",
        fun_fact: "The oxygen you breathe is a leftover from photosynthesis.",
        subject: Subject::Science,
    },
    CatalogEntry {
        id: "sci-red-planet",
        text: "Which planet is known as the Red Planet?",
        options: ["Venus", "Mars", "Jupiter", "Mercury"],
        correct_index: 1,
        hint: "It's named after the Roman god of war.",
        fun_fact: "Mars looks red because its soil is full of rusted iron.",
        subject: Subject::Science,
    },
    CatalogEntry {
        id: "sci-freezing-water",
        text: "What happens to water when it freezes?",
        options: ["It expands", "It shrinks", "It disappears", "It gets heavier"],
        correct_index: 0,
        hint: "Think about why ice cubes float.",
        fun_fact: "Water is one of the very few substances that grows when it freezes.",
        subject: Subject::Science,
    },
    CatalogEntry {
        id: "sci-heart",
        text: "Which organ pumps blood around your body?",
        options: ["The lungs", "The brain", "The heart", "The stomach"],
        correct_index: 2,
        hint: "You can feel it beat.",
        fun_fact: "Your heart beats about 100,000 times every day.",
        subject: Subject::Science,
    },
    CatalogEntry {
        id: "sci-states-of-matter",
        text: "Which of these is NOT a state of matter?",
        options: ["Solid", "Liquid", "Energy", "Gas"],
        correct_index: 2,
        hint: "Three of them describe how stuff takes up space.",
        fun_fact: "There is a fourth state of matter called plasma, and lightning is made of it.",
        subject: Subject::Science,
    },
    CatalogEntry {
        id: "sci-sound-in-space",
        text: "Why can't sound travel through space?",
        options: [
            "It's too cold",
            "There is no air to carry it",
            "It's too dark",
            "Space is too big",
        ],
        correct_index: 1,
        hint: "Sound needs something to travel through.",
        fun_fact: "In space, even the loudest explosion would be completely silent.",
        subject: Subject::Science,
    },
    CatalogEntry {
        id: "eng-noun",
        text: "Which word in the sentence 'The happy dog ran quickly' is a noun?",
        options: ["happy", "dog", "ran", "quickly"],
        correct_index: 1,
        hint: "A noun is a person, place, or thing.",
        fun_fact: "'Dog' is one of the oldest words in English with a mystery origin.",
        subject: Subject::English,
    },
    CatalogEntry {
        id: "eng-synonym-enormous",
        text: "Which word is a synonym of 'enormous'?",
        options: ["tiny", "huge", "narrow", "quiet"],
        correct_index: 1,
        hint: "A synonym means almost the same thing.",
        fun_fact: "English has more synonyms than most languages because it borrowed from so many.",
        subject: Subject::English,
    },
    CatalogEntry {
        id: "eng-antonym-ancient",
        text: "What is the antonym of 'ancient'?",
        options: ["old", "modern", "dusty", "historic"],
        correct_index: 1,
        hint: "An antonym means the opposite.",
        fun_fact: "'Ancient' comes from a Latin word meaning 'before'.",
        subject: Subject::English,
    },
    CatalogEntry {
        id: "eng-plural-child",
        text: "What is the plural of 'child'?",
        options: ["childs", "childes", "children", "childen"],
        correct_index: 2,
        hint: "It doesn't just add an 's'.",
        fun_fact: "'Children' keeps an old English plural ending that most words lost.",
        subject: Subject::English,
    },
    CatalogEntry {
        id: "eng-verb",
        text: "Which of these words is a verb?",
        options: ["jump", "blue", "softly", "table"],
        correct_index: 0,
        hint: "A verb is an action word.",
        fun_fact: "Some words, like 'run', can be both a noun and a verb.",
        subject: Subject::English,
    },
    CatalogEntry {
        id: "eng-simile",
        text: "'As brave as a lion' is an example of what?",
        options: ["A metaphor", "A simile", "An idiom", "Alliteration"],
        correct_index: 1,
        hint: "It compares two things using 'as' or 'like'.",
        fun_fact: "Similes using 'as' have been found in writing over 4,000 years old.",
        subject: Subject::English,
    },
];

/// Number of catalog questions (the modulus for odd-hash selection)
pub fn size() -> usize {
    CATALOG.len()
}

/// Look up the catalog question for a hash value
pub fn question_for(hash: u32) -> Question {
    let entry = &CATALOG[hash as usize % CATALOG.len()];
    Question {
        id: entry.id.to_string(),
        text: entry.text.to_string(),
        options: entry.options.map(String::from),
        correct_index: entry.correct_index,
        hint: entry.hint.to_string(),
        fun_fact: entry.fun_fact.to_string(),
        subject: entry.subject,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_integrity() {
        for (i, entry) in CATALOG.iter().enumerate() {
            assert!(entry.correct_index < 4, "entry {i} correct_index out of range");
            assert!(!entry.text.is_empty());

            let unique: std::collections::HashSet<&str> =
                entry.options.iter().copied().collect();
            assert_eq!(unique.len(), 4, "entry {i} has duplicate options");
        }
    }

    #[test]
    fn test_ids_unique() {
        let ids: std::collections::HashSet<&str> = CATALOG.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn test_lookup_wraps() {
        let n = size() as u32;
        assert_eq!(question_for(1).id, question_for(1 + n).id);
    }

    #[test]
    fn test_no_math_in_catalog() {
        use crate::model::Subject;
        assert!(CATALOG.iter().all(|e| e.subject != Subject::Math));
    }
}
