//! Keyword subject classifier
//!
//! Maps a movie's text and genre tags to a coarse subject category with an
//! ordered, first-match-wins rule table. Rule order is a designed priority,
//! not alphabetical: categories share vocabulary ("code" could mean
//! Scientists or Criminals), so the more specific reading is checked first —
//! in particular Scientists before Military and Criminals, because
//! scientific figures are frequently embedded in war narratives.
//!
//! Matching is plain substring containment on lowercased text, with no word
//! boundaries. That makes false positives possible ("sport" matches
//! "transport"); this is the documented current behavior, kept deliberately.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of subject categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Musicians,
    Athletes,
    Scientists,
    Activists,
    Businesspeople,
    ArtistsWriters,
    Politicians,
    Criminals,
    Entertainers,
    Military,
    HistoricalEvents,
    Other,
    Unknown,
}

impl Category {
    /// The label stored in the categories dimension table
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Musicians => "Musicians",
            Category::Athletes => "Athletes",
            Category::Scientists => "Scientists",
            Category::Activists => "Activists",
            Category::Businesspeople => "Businesspeople",
            Category::ArtistsWriters => "Artists & Writers",
            Category::Politicians => "Politicians",
            Category::Criminals => "Criminals",
            Category::Entertainers => "Entertainers",
            Category::Military => "Military",
            Category::HistoricalEvents => "Historical Events",
            Category::Other => "Other",
            Category::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub category: Category,
    pub occupation: Option<&'static str>,
    pub is_person: bool,
}

/// Lowercased inputs handed to rule predicates
struct RuleInput<'a> {
    title: &'a str,
    text: &'a str,
    tags: &'a str,
}

/// One classification rule. A rule matches when any keyword appears as a
/// substring of the text, or when its extra predicate fires.
struct Rule {
    category: Category,
    keywords: &'static [&'static str],
    /// keyword -> finer occupation label, first hit wins
    occupations: &'static [(&'static str, &'static str)],
    extra: Option<fn(&RuleInput) -> bool>,
}

/// Leading-text window inspected by the pronoun guard
const PRONOUN_WINDOW: usize = 500;

/// Pronoun markers that indicate a person-centered narrative. Matched at
/// word starts (note the leading space) so that articles like "the" do not
/// count as "he ".
const PRONOUN_MARKERS: [&str; 5] = [" he ", " she ", " his ", " her ", " him "];

fn military_extra(input: &RuleInput) -> bool {
    input.text.contains("military") && !input.text.contains("mixed martial")
}

/// Event-centered narratives, unlike biographical ones, rarely open with a
/// personal pronoun; the guard only inspects the leading text, so long
/// summaries that mention people later still qualify. Ambiguous on short
/// summaries.
fn historical_events_extra(input: &RuleInput) -> bool {
    const TITLE_KEYWORDS: [&str; 5] = ["disaster", "attack", "operation", "mission", "incident"];

    if TITLE_KEYWORDS.iter().any(|kw| input.title.contains(kw)) {
        return true;
    }

    if !input.tags.contains("war") && !input.tags.contains("history") {
        return false;
    }

    // pad so a pronoun at the very start of the text still matches
    let leading: String = std::iter::once(' ')
        .chain(input.text.chars().take(PRONOUN_WINDOW))
        .collect();
    !PRONOUN_MARKERS.iter().any(|p| leading.contains(p))
}

/// The ordered rule table. Evaluation short-circuits on the first match.
static RULES: &[Rule] = &[
    Rule {
        category: Category::Musicians,
        keywords: &[
            "musician", "singer", "vocalist", "composer", "band member", "performs", "concert",
            "album", "rapper", "hip hop", "pianist", "piano", "musical family", "selena",
        ],
        occupations: &[
            ("rapper", "Rapper"),
            ("singer", "Singer"),
            ("vocalist", "Singer"),
            ("composer", "Composer"),
            ("pianist", "Pianist"),
            ("musician", "Musician"),
        ],
        extra: None,
    },
    Rule {
        category: Category::Athletes,
        keywords: &[
            "boxer", "boxing", "football", "basketball", "baseball", "olympic", "race car",
            "racing driver", "quarterback", "athlete", "coach", "sport", "mixed martial", "mma",
            "fighter",
        ],
        occupations: &[
            ("boxer", "Boxer"),
            ("boxing", "Boxer"),
            ("quarterback", "Quarterback"),
            ("racing driver", "Racing Driver"),
            ("race car", "Racing Driver"),
            ("basketball", "Basketball Player"),
            ("baseball", "Baseball Player"),
            ("football", "Football Player"),
            ("mixed martial", "MMA Fighter"),
            ("mma", "MMA Fighter"),
            ("coach", "Coach"),
            ("athlete", "Athlete"),
        ],
        extra: None,
    },
    Rule {
        category: Category::Scientists,
        keywords: &[
            "scientist", "mathematician", "physicist", "professor", "researcher", "theory",
            "discover", "invention", "academic", "cryptanalyst", "oppenheimer", "turing",
            "atomic bomb", "enigma", "code", "cipher", "computation",
        ],
        occupations: &[
            ("mathematician", "Mathematician"),
            ("physicist", "Physicist"),
            ("cryptanalyst", "Cryptanalyst"),
            ("professor", "Professor"),
            ("researcher", "Researcher"),
            ("scientist", "Scientist"),
        ],
        extra: None,
    },
    Rule {
        category: Category::Activists,
        keywords: &[
            "activist", "civil rights", "protest", "movement", "rights", "equality",
            "discrimination", "segregation", "slavery", "slave", "freedom", "abolitionist",
            "black panthers", "free black man",
        ],
        occupations: &[("abolitionist", "Abolitionist"), ("activist", "Activist")],
        extra: None,
    },
    Rule {
        category: Category::Businesspeople,
        keywords: &[
            "entrepreneur", "ceo", "founder", "billionaire", "creates a company",
            "starts a business", "facebook", "zuckerberg", "businessman",
        ],
        occupations: &[
            ("entrepreneur", "Entrepreneur"),
            ("ceo", "CEO"),
            ("founder", "Founder"),
            ("businessman", "Businessman"),
        ],
        extra: None,
    },
    Rule {
        category: Category::ArtistsWriters,
        keywords: &[
            "artist", "painter", "writer", "author", "novel", "book", "paint", "artwork",
            "treasure hunt", "monuments men", "architect",
        ],
        occupations: &[
            ("painter", "Painter"),
            ("author", "Author"),
            ("writer", "Writer"),
            ("architect", "Architect"),
            ("artist", "Artist"),
        ],
        extra: None,
    },
    Rule {
        category: Category::Politicians,
        keywords: &[
            "president", "prime minister", "governor", "senator", "politician", "election",
            "campaign", "congress", "parliament", "fbi agent", "deep throat", "watergate",
        ],
        occupations: &[
            ("prime minister", "Prime Minister"),
            ("president", "President"),
            ("governor", "Governor"),
            ("senator", "Senator"),
            ("fbi agent", "FBI Agent"),
            ("politician", "Politician"),
        ],
        extra: None,
    },
    Rule {
        category: Category::Criminals,
        keywords: &[
            "gangster", "mob boss", "mafia", "drug lord", "cartel", "heist", "robbery", "outlaw",
            "infiltrates",
        ],
        occupations: &[
            ("mob boss", "Mob Boss"),
            ("gangster", "Gangster"),
            ("drug lord", "Drug Lord"),
            ("outlaw", "Outlaw"),
        ],
        extra: None,
    },
    Rule {
        category: Category::Entertainers,
        keywords: &[
            "actor", "actress", "director", "film producer", "hollywood", "performance", "stage",
        ],
        occupations: &[
            ("actress", "Actress"),
            ("actor", "Actor"),
            ("film producer", "Film Producer"),
            ("director", "Director"),
        ],
        extra: None,
    },
    Rule {
        category: Category::Military,
        keywords: &[
            "soldier", "general", "navy", "marine", "combat", "colonel", "sergeant", "veteran",
            "squadron", "medic", "prisoner of war", "wwii", "world war",
        ],
        occupations: &[
            ("soldier", "Soldier"),
            ("colonel", "Colonel"),
            ("sergeant", "Sergeant"),
            ("general", "General"),
            ("medic", "Medic"),
            ("veteran", "Veteran"),
        ],
        extra: Some(military_extra),
    },
    Rule {
        category: Category::HistoricalEvents,
        keywords: &[],
        occupations: &[],
        extra: Some(historical_events_extra),
    },
];

/// Classify a movie from its title, free text, and genre tags.
///
/// Pure and deterministic: identical inputs always yield the identical
/// result. Absent or empty text classifies as Unknown without evaluating
/// any rule.
pub fn classify(title: &str, free_text: Option<&str>, tags: Option<&str>) -> Subject {
    let Some(text) = free_text.filter(|t| !t.trim().is_empty()) else {
        return Subject {
            category: Category::Unknown,
            occupation: None,
            is_person: true,
        };
    };

    let title_lower = title.to_lowercase();
    let text_lower = text.to_lowercase();
    let tags_lower = tags.unwrap_or("").to_lowercase();

    let input = RuleInput {
        title: &title_lower,
        text: &text_lower,
        tags: &tags_lower,
    };

    for rule in RULES {
        let keyword_hit = rule.keywords.iter().any(|kw| input.text.contains(kw));
        let extra_hit = rule.extra.map(|f| f(&input)).unwrap_or(false);

        if keyword_hit || extra_hit {
            let occupation = rule
                .occupations
                .iter()
                .find(|(kw, _)| input.text.contains(kw))
                .map(|(_, label)| *label);

            return Subject {
                category: rule.category,
                occupation,
                is_person: rule.category != Category::HistoricalEvents,
            };
        }
    }

    Subject {
        category: Category::Other,
        occupation: None,
        is_person: true,
    }
}
