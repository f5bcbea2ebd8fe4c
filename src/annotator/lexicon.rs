//! A lexicon-driven annotator.
//!
//! Tags tokens with Penn Treebank tags, Universal coarse categories and
//! `PERSON` entities using closed-class word lists, a verb lexicon with
//! generated inflections, suffix rules and a first-name gazetteer. It needs
//! no model files and is deterministic.

use std::collections::{HashMap, HashSet};

use super::tokenizer::word_spans;
use super::{AnnotatedToken, CoarsePos, PERSON, SentenceAnnotation, SentenceAnnotator};
use crate::error::AnnotationError;

const PERSONAL_PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "yourselves", "themselves", "mine",
    "yours", "hers", "ours", "theirs", "u", "ya",
];

const POSSESSIVE_PRONOUNS: &[&str] = &["my", "your", "his", "its", "our", "their", "ur"];

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "some", "any", "no", "every", "each",
    "all", "another", "both", "either", "neither", "such",
];

const MODALS: &[&str] = &[
    "can", "could", "will", "would", "shall", "should", "may", "might", "must", "'ll", "'d",
    "ca", "wo",
];

const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "for", "with", "by", "from", "of", "about", "into", "through", "during",
    "before", "after", "above", "below", "between", "under", "over", "against", "among",
    "without", "within", "than", "via", "per", "across", "along", "around", "behind", "beyond",
    "despite", "toward", "towards", "upon", "onto", "like", "amid", "throughout",
];

const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "plus", "&"];

const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "if", "while", "unless", "whereas", "whether", "since",
    "once", "until", "cause", "cuz",
];

const INTERJECTIONS: &[&str] = &[
    "yes", "yeah", "yep", "nope", "wow", "oh", "hey", "lol", "lmao", "omg", "haha", "ok", "okay",
    "please", "pls", "thanks", "ugh", "hmm",
];

const ADVERBS: &[&str] = &[
    "very", "also", "too", "always", "often", "never", "just", "only", "still", "really", "even",
    "already", "again", "ever", "here", "now", "then", "soon", "quite", "rather", "almost",
    "maybe", "perhaps", "actually", "however", "therefore", "thus", "hence", "so", "together",
    "instead", "much", "well", "away", "anymore", "yet", "else", "indeed", "sometimes", "today",
    "tomorrow", "yesterday", "back", "up", "down", "out", "off",
];

const ADJECTIVES: &[&str] = &[
    "new", "good", "bad", "high", "low", "big", "small", "large", "great", "important",
    "significant", "safe", "true", "false", "real", "possible", "different", "same", "similar",
    "major", "minor", "clear", "strong", "weak", "old", "young", "long", "short", "early",
    "late", "recent", "common", "rare", "other", "many", "few", "several", "key", "main",
    "novel", "public", "human", "global", "local", "natural", "political", "economic", "social",
    "environmental", "genetic", "healthy", "toxic", "severe", "mild", "efficient", "accurate",
    "certain", "free", "full", "whole", "open", "simple", "hard", "easy", "huge", "tiny", "vast",
    "own", "daily", "likely", "unlikely", "deadly", "elderly", "costly", "friendly", "lonely",
    "ugly", "holy", "silly", "lovely", "medical", "clinical", "chronic", "acute", "viral",
    "annual", "total", "overall", "current", "previous", "entire", "original", "crucial",
    "essential", "critical", "urgent", "obvious", "worth", "interesting", "amazing",
    "fascinating", "surprising", "alarming", "worrying", "exciting", "concerning",
];

const COMPARATIVES: &[&str] = &[
    "more", "less", "better", "worse", "higher", "lower", "larger", "smaller", "greater",
    "fewer", "bigger", "faster", "slower", "older", "younger", "stronger", "weaker",
];

const SUPERLATIVES: &[&str] = &[
    "most", "least", "best", "worst", "highest", "lowest", "largest", "smallest", "greatest",
    "fewest", "biggest", "fastest", "oldest", "strongest",
];

/// Nouns and adjectives that end in `-ly` but are not adverbs.
const LY_NOUNS: &[&str] = &[
    "family", "supply", "reply", "july", "italy", "ally", "belly", "jelly", "rally", "assembly",
    "anomaly", "monopoly", "butterfly", "fly", "lily", "melancholy",
];

const TITLES: &[&str] = &[
    "dr", "mr", "mrs", "ms", "prof", "professor", "sir", "dame", "lady", "lord", "president",
    "senator", "governor", "minister",
];

const FIRST_NAMES: &[&str] = &[
    "aaron", "adam", "alan", "albert", "alexander", "alice", "amanda", "amy", "andrea", "andrew",
    "angela", "anna", "anthony", "ashley", "barbara", "benjamin", "betty", "brandon", "brenda",
    "brian", "bruce", "carl", "catherine", "charles", "charlotte", "cheryl", "christian",
    "christina", "christine", "cynthia", "daniel", "david", "deborah", "dennis", "diana",
    "donald", "donna", "dorothy", "douglas", "dylan", "edward", "elizabeth", "emily", "emma",
    "eric", "ethan", "eugene", "evelyn", "gary", "george", "gerald", "gloria", "gregory",
    "hannah", "harold", "heather", "helen", "henry", "isaac", "isabella", "jacob", "james",
    "janet", "jason", "jeffrey", "jennifer", "jeremy", "jessica", "john", "jonathan", "joseph",
    "joshua", "judith", "julia", "julie", "justin", "karen", "katherine", "kathleen", "keith",
    "kelly", "kenneth", "kevin", "kyle", "larry", "laura", "lauren", "lawrence", "linda", "lisa",
    "margaret", "maria", "marie", "martha", "mary", "matthew", "megan", "melissa", "michael",
    "michelle", "nancy", "nathan", "nicholas", "nicole", "nikola", "noah", "olivia", "pamela",
    "patricia", "patrick", "paul", "peter", "philip", "rachel", "raymond", "rebecca", "richard",
    "robert", "ronald", "ruth", "ryan", "samantha", "samuel", "sandra", "sarah", "scott", "sean",
    "sharon", "sophia", "stephanie", "stephen", "steven", "susan", "teresa", "thomas", "timothy",
    "tyler", "walter", "william", "zachary", "einstein", "newton", "darwin", "curie", "fauci",
    "hawking", "sagan", "galileo",
];

/// Verb base forms; regular inflections are generated.
const VERBS: &[&str] = &[
    "make", "cause", "show", "contain", "include", "become", "provide", "require", "use",
    "create", "support", "enable", "allow", "produce", "generate", "lead", "result", "affect",
    "influence", "determine", "represent", "consist", "exist", "occur", "improve", "reduce",
    "increase", "decrease", "change", "give", "take", "get", "know", "think", "believe", "say",
    "tell", "see", "find", "want", "need", "seem", "appear", "work", "move", "come", "go", "run",
    "help", "start", "stop", "keep", "bring", "hold", "mean", "play", "read", "write", "live",
    "die", "suggest", "indicate", "demonstrate", "reveal", "prove", "confirm", "claim", "argue",
    "conclude", "imply", "report", "predict", "discover", "establish", "propose", "advocate",
    "highlight", "constitute", "describe", "illustrate", "display", "offer", "underline",
    "develop", "explain", "link", "associate", "protect", "prevent", "kill", "boost", "lower",
    "raise", "slow", "damage", "harm", "cure", "treat", "spread", "infect", "warn", "estimate",
    "measure", "test", "feel", "grow", "rise", "fall", "build", "leave", "begin", "win", "lose",
    "put", "let", "set", "cut", "hurt", "love", "hate", "like", "try", "ask", "look", "call",
    "turn", "happen", "remain", "suffer", "trigger", "lack", "fail", "doubt", "deny", "admit",
    "stop", "drop", "plan", "control", "refer", "prefer", "commit", "permit", "eat", "drink",
    "sleep", "agree", "disagree", "expect", "hope", "wish", "understand", "learn", "teach",
];

/// `(base, past, past participle)` for irregular verbs.
const IRREGULAR: &[(&str, &str, &str)] = &[
    ("make", "made", "made"),
    ("show", "showed", "shown"),
    ("become", "became", "become"),
    ("lead", "led", "led"),
    ("give", "gave", "given"),
    ("take", "took", "taken"),
    ("get", "got", "gotten"),
    ("know", "knew", "known"),
    ("think", "thought", "thought"),
    ("say", "said", "said"),
    ("tell", "told", "told"),
    ("see", "saw", "seen"),
    ("find", "found", "found"),
    ("come", "came", "come"),
    ("go", "went", "gone"),
    ("run", "ran", "run"),
    ("keep", "kept", "kept"),
    ("bring", "brought", "brought"),
    ("hold", "held", "held"),
    ("mean", "meant", "meant"),
    ("read", "read", "read"),
    ("write", "wrote", "written"),
    ("prove", "proved", "proven"),
    ("spread", "spread", "spread"),
    ("feel", "felt", "felt"),
    ("grow", "grew", "grown"),
    ("rise", "rose", "risen"),
    ("fall", "fell", "fallen"),
    ("build", "built", "built"),
    ("leave", "left", "left"),
    ("begin", "began", "begun"),
    ("win", "won", "won"),
    ("lose", "lost", "lost"),
    ("put", "put", "put"),
    ("let", "let", "let"),
    ("set", "set", "set"),
    ("cut", "cut", "cut"),
    ("hurt", "hurt", "hurt"),
    ("understand", "understood", "understood"),
    ("teach", "taught", "taught"),
    ("eat", "ate", "eaten"),
    ("drink", "drank", "drunk"),
    ("sleep", "slept", "slept"),
    ("pay", "paid", "paid"),
];

/// Verbs that double their final consonant before `-ed`/`-ing`.
const DOUBLING: &[&str] = &[
    "stop", "drop", "plan", "occur", "admit", "commit", "control", "refer", "prefer", "permit",
    "run", "win", "cut", "put", "let", "set", "begin", "get",
];

/// Forms of `be`, `have` and `do` with their fine tags.
const AUXILIARIES: &[(&str, &str)] = &[
    ("is", "VBZ"),
    ("are", "VBP"),
    ("'re", "VBP"),
    ("am", "VBP"),
    ("'m", "VBP"),
    ("was", "VBD"),
    ("were", "VBD"),
    ("be", "VB"),
    ("been", "VBN"),
    ("being", "VBG"),
    ("has", "VBZ"),
    ("have", "VBP"),
    ("'ve", "VBP"),
    ("had", "VBD"),
    ("having", "VBG"),
    ("does", "VBZ"),
    ("do", "VBP"),
    ("did", "VBD"),
];

/// Inflectional form of a verb in the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerbForm {
    Base,
    ThirdPerson,
    Past,
    Participle,
    Gerund,
}

/// Context-free lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lex {
    Punct(&'static str),
    Symbol(&'static str),
    Pronoun,
    Possessive,
    Her,
    Wh(&'static str),
    Determiner,
    Modal,
    Auxiliary(&'static str),
    Clitic,
    Negation,
    To,
    Preposition,
    Coordinator,
    Subordinator,
    Interjection,
    Number,
    Adverb,
    Adjective(&'static str),
    Verb(VerbForm),
    Title,
    FirstName,
    Open,
}

/// A rule-based annotator with built-in English lexicons.
pub struct LexiconAnnotator {
    verbs: HashMap<String, VerbForm>,
    closed: HashMap<&'static str, Lex>,
    first_names: HashSet<&'static str>,
}

impl Default for LexiconAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconAnnotator {
    /// Create a new lexicon annotator.
    #[must_use]
    pub fn new() -> Self {
        let mut verbs = HashMap::new();
        let irregular: HashMap<&str, (&str, &str)> = IRREGULAR
            .iter()
            .map(|&(base, past, part)| (base, (past, part)))
            .collect();

        for &base in VERBS {
            let (past, participle) = match irregular.get(base) {
                Some(&(past, part)) => (past.to_string(), part.to_string()),
                None => {
                    let past = past_tense(base);
                    (past.clone(), past)
                }
            };
            // Earlier insertions win so that `read` stays a base form.
            verbs.entry(base.to_string()).or_insert(VerbForm::Base);
            verbs
                .entry(third_person(base))
                .or_insert(VerbForm::ThirdPerson);
            if past == participle {
                verbs.entry(past).or_insert(VerbForm::Past);
            } else {
                verbs.entry(past).or_insert(VerbForm::Past);
                verbs.entry(participle).or_insert(VerbForm::Participle);
            }
            verbs.entry(gerund(base)).or_insert(VerbForm::Gerund);
        }

        let mut closed: HashMap<&'static str, Lex> = HashMap::new();
        for &w in ADVERBS {
            closed.insert(w, Lex::Adverb);
        }
        for &w in ADJECTIVES {
            closed.insert(w, Lex::Adjective("JJ"));
        }
        for &w in COMPARATIVES {
            closed.insert(w, Lex::Adjective("JJR"));
        }
        for &w in SUPERLATIVES {
            closed.insert(w, Lex::Adjective("JJS"));
        }
        for &w in INTERJECTIONS {
            closed.insert(w, Lex::Interjection);
        }
        for &w in SUBORDINATORS {
            closed.insert(w, Lex::Subordinator);
        }
        for &w in COORDINATORS {
            closed.insert(w, Lex::Coordinator);
        }
        for &w in PREPOSITIONS {
            closed.insert(w, Lex::Preposition);
        }
        for &w in TITLES {
            closed.insert(w, Lex::Title);
        }
        for &(w, tag) in AUXILIARIES {
            closed.insert(w, Lex::Auxiliary(tag));
        }
        for &w in MODALS {
            closed.insert(w, Lex::Modal);
        }
        for &w in DETERMINERS {
            closed.insert(w, Lex::Determiner);
        }
        for &w in POSSESSIVE_PRONOUNS {
            closed.insert(w, Lex::Possessive);
        }
        for &w in PERSONAL_PRONOUNS {
            closed.insert(w, Lex::Pronoun);
        }
        for (w, tag) in [
            ("who", "WP"),
            ("whom", "WP"),
            ("what", "WP"),
            ("whose", "WP$"),
            ("which", "WDT"),
            ("how", "WRB"),
            ("when", "WRB"),
            ("why", "WRB"),
            ("where", "WRB"),
        ] {
            closed.insert(w, Lex::Wh(tag));
        }
        closed.insert("her", Lex::Her);
        closed.insert("to", Lex::To);
        closed.insert("not", Lex::Negation);
        closed.insert("n't", Lex::Negation);
        closed.insert("'s", Lex::Clitic);
        closed.insert("’s", Lex::Clitic);

        Self {
            verbs,
            closed,
            first_names: FIRST_NAMES.iter().copied().collect(),
        }
    }

    fn lexical(&self, word: &str) -> Lex {
        if let Some(lex) = punctuation(word) {
            return lex;
        }
        if let Some(&lex) = self.closed.get(word) {
            return lex;
        }
        if let Some(&form) = self.verbs.get(word) {
            return Lex::Verb(form);
        }
        if is_number(word) {
            return Lex::Number;
        }
        if self.first_names.contains(word) {
            return Lex::FirstName;
        }
        Lex::Open
    }

    /// Resolve one token given its neighbours.
    fn resolve(
        &self,
        word: &str,
        original: &str,
        lex: Lex,
        prev: Option<&AnnotatedToken>,
        next: Option<Lex>,
        sentence_start: bool,
    ) -> (&'static str, CoarsePos) {
        let prev_tag = prev.map_or("", |t| t.tag.as_str());
        match lex {
            Lex::Punct(tag) => (tag, CoarsePos::Punct),
            Lex::Symbol(tag) => (tag, CoarsePos::from_tag(tag)),
            Lex::Pronoun => ("PRP", CoarsePos::Pron),
            Lex::Possessive => ("PRP$", CoarsePos::Pron),
            Lex::Her => match next {
                Some(Lex::Open | Lex::Adjective(_) | Lex::Verb(_) | Lex::FirstName) => {
                    ("PRP$", CoarsePos::Pron)
                }
                _ => ("PRP", CoarsePos::Pron),
            },
            Lex::Wh(tag) => (tag, CoarsePos::from_tag(tag)),
            Lex::Determiner => ("DT", CoarsePos::Det),
            Lex::Modal => ("MD", CoarsePos::Aux),
            Lex::Auxiliary(tag) => (tag, CoarsePos::Aux),
            Lex::Clitic => {
                if prev.is_some_and(|p| p.pos == CoarsePos::Pron || p.lower == "there") {
                    ("VBZ", CoarsePos::Aux)
                } else {
                    ("POS", CoarsePos::Part)
                }
            }
            Lex::Negation => ("RB", CoarsePos::Part),
            Lex::To => match next {
                Some(Lex::Verb(VerbForm::Base) | Lex::Auxiliary("VB")) => ("TO", CoarsePos::Part),
                _ => ("IN", CoarsePos::Adp),
            },
            Lex::Preposition => ("IN", CoarsePos::Adp),
            Lex::Coordinator => ("CC", CoarsePos::Cconj),
            Lex::Subordinator => ("IN", CoarsePos::Sconj),
            Lex::Interjection => ("UH", CoarsePos::Intj),
            Lex::Number => ("CD", CoarsePos::Num),
            Lex::Adverb => ("RB", CoarsePos::Adv),
            Lex::Adjective(tag) => (tag, CoarsePos::Adj),
            Lex::Title => ("NNP", CoarsePos::Propn),
            Lex::FirstName => ("NNP", CoarsePos::Propn),
            Lex::Verb(form) => resolve_verb(word, form, prev, prev_tag, next, sentence_start),
            Lex::Open => resolve_open(word, original, sentence_start),
        }
    }
}

fn resolve_verb(
    word: &str,
    form: VerbForm,
    prev: Option<&AnnotatedToken>,
    prev_tag: &str,
    next: Option<Lex>,
    sentence_start: bool,
) -> (&'static str, CoarsePos) {
    let prev_pos = prev.map(|p| p.pos);
    let after_modifier = matches!(
        prev_pos,
        Some(CoarsePos::Det | CoarsePos::Adj | CoarsePos::Num | CoarsePos::Adp)
    ) || matches!(prev_tag, "PRP$" | "POS");
    let next_is_verbal = matches!(
        next,
        Some(Lex::Verb(_) | Lex::Modal | Lex::Auxiliary(_) | Lex::Negation)
    );
    let plural_subject = word.ends_with('s')
        && matches!(form, VerbForm::ThirdPerson)
        && next_is_verbal
        && prev_pos != Some(CoarsePos::Pron);

    let noun_reading = match form {
        VerbForm::ThirdPerson | VerbForm::Base => {
            (after_modifier && prev_tag != "TO") || plural_subject
        }
        VerbForm::Gerund => matches!(prev_pos, Some(CoarsePos::Det)) || prev_tag == "PRP$",
        VerbForm::Past | VerbForm::Participle => false,
    };
    if noun_reading {
        return if word.ends_with('s') && form == VerbForm::ThirdPerson {
            ("NNS", CoarsePos::Noun)
        } else {
            ("NN", CoarsePos::Noun)
        };
    }
    // A bare verb form opening a sentence and followed by a verb is a
    // plural noun subject ("results show ...").
    if sentence_start && next_is_verbal && form == VerbForm::Base && word.ends_with('s') {
        return ("NNS", CoarsePos::Noun);
    }

    let after_aux = prev.is_some_and(|p| p.pos == CoarsePos::Aux);
    let tag = match form {
        VerbForm::Base => {
            if matches!(prev_tag, "MD" | "TO") || (after_aux && prev_tag.starts_with("VB")) {
                "VB"
            } else {
                "VBP"
            }
        }
        VerbForm::ThirdPerson => "VBZ",
        VerbForm::Past => {
            if after_aux {
                "VBN"
            } else {
                "VBD"
            }
        }
        VerbForm::Participle => "VBN",
        VerbForm::Gerund => "VBG",
    };
    (tag, CoarsePos::Verb)
}

fn resolve_open(word: &str, original: &str, sentence_start: bool) -> (&'static str, CoarsePos) {
    if !sentence_start && original.chars().next().is_some_and(char::is_uppercase) {
        return ("NNP", CoarsePos::Propn);
    }
    if word.ends_with("ly") && !LY_NOUNS.contains(&word) && word.len() > 4 {
        return ("RB", CoarsePos::Adv);
    }
    if has_noun_suffix(word) {
        return noun_tag(word);
    }
    if has_adjective_suffix(word) {
        return ("JJ", CoarsePos::Adj);
    }
    noun_tag(word)
}

fn noun_tag(word: &str) -> (&'static str, CoarsePos) {
    let plural = word.len() > 3
        && word.ends_with('s')
        && !["ss", "us", "is", "ics"].iter().any(|s| word.ends_with(s));
    if plural {
        ("NNS", CoarsePos::Noun)
    } else {
        ("NN", CoarsePos::Noun)
    }
}

fn has_noun_suffix(word: &str) -> bool {
    [
        "tion", "sion", "ness", "ment", "ity", "ence", "ance", "ism", "ist", "ogy", "ship",
        "tions", "sions", "ments", "ists", "ities",
    ]
    .iter()
    .any(|s| word.ends_with(s))
}

fn has_adjective_suffix(word: &str) -> bool {
    ["ful", "less", "ous", "ive", "able", "ible", "ical", "ific", "istic"]
        .iter()
        .any(|s| word.ends_with(s) && word.len() > s.len() + 2)
}

fn punctuation(word: &str) -> Option<Lex> {
    if word.chars().any(char::is_alphanumeric) {
        return None;
    }
    let lex = match word {
        "." | "!" | "?" | "…" | "..." => Lex::Punct("."),
        "," => Lex::Punct(","),
        ":" | ";" | "–" | "—" | "--" => Lex::Punct(":"),
        "-" => Lex::Punct("HYPH"),
        "(" | "[" | "{" => Lex::Punct("-LRB-"),
        ")" | "]" | "}" => Lex::Punct("-RRB-"),
        "\"" | "'" | "“" | "”" | "‘" | "’" | "`" | "``" | "''" => Lex::Punct("''"),
        "$" | "€" | "£" => Lex::Symbol("$"),
        "%" => Lex::Symbol("NN"),
        "&" | "'s" | "n't" | "'re" | "'ve" | "'ll" | "'d" | "'m" => return None,
        "#" | "@" | "+" | "=" | "<" | ">" | "/" | "\\" | "|" | "~" | "^" | "*" => {
            Lex::Symbol("SYM")
        }
        _ => Lex::Punct("NFP"),
    };
    Some(lex)
}

fn is_number(word: &str) -> bool {
    let mut digits = 0;
    for c in word.chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if !matches!(c, '.' | ',') {
            return false;
        }
    }
    digits > 0
        || matches!(
            word,
            "one" | "two" | "three" | "four" | "five" | "six" | "seven" | "eight" | "nine"
                | "ten" | "hundred" | "thousand" | "million" | "billion"
        )
}

fn third_person(base: &str) -> String {
    if let Some(stem) = base.strip_suffix('y')
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
    {
        return format!("{stem}ies");
    }
    if ["s", "sh", "ch", "x", "z", "o"].iter().any(|s| base.ends_with(s)) {
        return format!("{base}es");
    }
    format!("{base}s")
}

fn past_tense(base: &str) -> String {
    if base.ends_with('e') {
        return format!("{base}d");
    }
    if let Some(stem) = base.strip_suffix('y')
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
    {
        return format!("{stem}ied");
    }
    if DOUBLING.contains(&base)
        && let Some(last) = base.chars().last()
    {
        return format!("{base}{last}ed");
    }
    format!("{base}ed")
}

fn gerund(base: &str) -> String {
    if let Some(stem) = base.strip_suffix("ie") {
        return format!("{stem}ying");
    }
    if let Some(stem) = base.strip_suffix('e')
        && !base.ends_with("ee")
        && base.len() > 2
    {
        return format!("{stem}ing");
    }
    if DOUBLING.contains(&base)
        && let Some(last) = base.chars().last()
    {
        return format!("{base}{last}ing");
    }
    format!("{base}ing")
}

impl SentenceAnnotator for LexiconAnnotator {
    fn annotate(&self, sentence: &str) -> Result<SentenceAnnotation, AnnotationError> {
        let spans = word_spans(sentence);
        let words: Vec<String> = spans.iter().map(|t| t.text.to_lowercase()).collect();
        let lexes: Vec<Lex> = words.iter().map(|w| self.lexical(w)).collect();

        let mut tokens: Vec<AnnotatedToken> = Vec::with_capacity(spans.len());
        // A title stays pending across the "." of "dr." so the next name is
        // still picked up as a person.
        let mut pending_title = false;

        for (i, span) in spans.iter().enumerate() {
            let word = &words[i];
            let lex = lexes[i];
            let prev = tokens.last();
            let sentence_start = prev.is_none_or(|p| p.tag == ".");
            let (tag, pos) = self.resolve(
                word,
                span.text,
                lex,
                prev,
                lexes.get(i + 1).copied(),
                sentence_start,
            );

            // Only one surname follows a first name.
            let prev_is_person = prev.is_some_and(AnnotatedToken::is_person)
                && i > 0
                && lexes[i - 1] == Lex::FirstName;
            let is_person = match lex {
                Lex::FirstName => true,
                Lex::Open => {
                    (pending_title || prev_is_person) && pos == CoarsePos::Noun && tag == "NN"
                }
                _ => false,
            };

            let mut token = AnnotatedToken::new(span.text, tag, pos);
            if is_person {
                token.tag = "NNP".to_string();
                token.pos = CoarsePos::Propn;
                token = token.with_entity(PERSON);
            } else if lex == Lex::Number {
                let year = word.len() == 4
                    && word.parse::<u16>().is_ok_and(|y| (1800..=2100).contains(&y));
                token = token.with_entity(if year { "DATE" } else { "CARDINAL" });
            }

            pending_title = match lex {
                Lex::Title => true,
                Lex::Punct(".") => pending_title && word == ".",
                _ => false,
            };
            tokens.push(token);
        }

        Ok(SentenceAnnotation::new(tokens))
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotator::{POSSESSIVE_PRONOUN, PERSONAL_PRONOUN};

    fn tags(sentence: &str) -> Vec<(String, String, String)> {
        LexiconAnnotator::new()
            .annotate(sentence)
            .unwrap()
            .tokens
            .into_iter()
            .map(|t| (t.lower, t.tag, t.pos.as_str().to_string()))
            .collect()
    }

    fn pos_of(sentence: &str, word: &str) -> CoarsePos {
        let annotation = LexiconAnnotator::new().annotate(sentence).unwrap();
        let idx = annotation.position(word).unwrap();
        annotation.tokens[idx].pos
    }

    #[test]
    fn test_inflections() {
        assert_eq!(third_person("show"), "shows");
        assert_eq!(third_person("imply"), "implies");
        assert_eq!(third_person("reach"), "reaches");
        assert_eq!(past_tense("suggest"), "suggested");
        assert_eq!(past_tense("cause"), "caused");
        assert_eq!(past_tense("stop"), "stopped");
        assert_eq!(past_tense("deny"), "denied");
        assert_eq!(gerund("die"), "dying");
        assert_eq!(gerund("cause"), "causing");
        assert_eq!(gerund("see"), "seeing");
        assert_eq!(gerund("run"), "running");
    }

    #[test]
    fn test_claim_sentence_tags() {
        let tagged = tags("studies show vaccines reduce infection rates");
        let pos: Vec<&str> = tagged.iter().map(|(_, _, p)| p.as_str()).collect();
        assert_eq!(pos, vec!["NOUN", "VERB", "NOUN", "VERB", "NOUN", "NOUN"]);
        assert_eq!(tagged[0].1, "NNS");
        assert_eq!(tagged[1].1, "VBP");
    }

    #[test]
    fn test_pronouns() {
        let tagged = tags("i think my data is interesting");
        assert_eq!(tagged[0].1, PERSONAL_PRONOUN);
        assert_eq!(tagged[2].1, POSSESSIVE_PRONOUN);
        assert_eq!(tagged[3].2, "NOUN");
        assert_eq!(tagged[4].2, "AUX");
        assert_eq!(tagged[5].2, "ADJ");
    }

    #[test]
    fn test_her_disambiguation() {
        assert_eq!(tags("her study shows this")[0].1, "PRP$");
        assert_eq!(tags("they told her .")[2].1, "PRP");
    }

    #[test]
    fn test_noun_verb_ambiguity() {
        assert_eq!(pos_of("the results show effects", "results"), CoarsePos::Noun);
        assert_eq!(pos_of("results show effects", "results"), CoarsePos::Noun);
        assert_eq!(pos_of("this work shows effects", "work"), CoarsePos::Noun);
        assert_eq!(pos_of("data shows effects", "shows"), CoarsePos::Verb);
        assert_eq!(pos_of("they need help", "need"), CoarsePos::Verb);
        assert_eq!(pos_of("the smoking kills", "smoking"), CoarsePos::Noun);
    }

    #[test]
    fn test_verb_tags_after_auxiliaries() {
        let tagged = tags("research has shown that it can reduce risk");
        let shown = tagged.iter().find(|(w, _, _)| w == "shown").unwrap();
        assert_eq!(shown.1, "VBN");
        let reduce = tagged.iter().find(|(w, _, _)| w == "reduce").unwrap();
        assert_eq!(reduce.1, "VB");
    }

    #[test]
    fn test_person_entities() {
        let annotation = LexiconAnnotator::new()
            .annotate("dr. smith says masks work")
            .unwrap();
        let ents: Vec<&str> = annotation.tokens.iter().map(|t| t.ent_type.as_str()).collect();
        assert_eq!(ents, vec!["", "", PERSON, "", "", ""]);

        let annotation = LexiconAnnotator::new()
            .annotate("john miller thinks so")
            .unwrap();
        assert!(annotation.tokens[0].is_person());
        assert!(annotation.tokens[1].is_person());
        assert!(!annotation.tokens[2].is_person());
    }

    #[test]
    fn test_numbers_and_punctuation() {
        let annotation = LexiconAnnotator::new()
            .annotate("in 2020, 45 % rose!")
            .unwrap();
        let t = &annotation.tokens;
        assert_eq!(t[1].ent_type, "DATE");
        assert_eq!(t[2].pos, CoarsePos::Punct);
        assert_eq!(t[3].ent_type, "CARDINAL");
        assert_eq!(t[4].pos, CoarsePos::Noun);
        assert_eq!(t[6].tag, ".");
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(pos_of("a harmful effect", "harmful"), CoarsePos::Adj);
        assert_eq!(pos_of("we quickly left", "quickly"), CoarsePos::Adv);
        assert_eq!(pos_of("my family left", "family"), CoarsePos::Noun);
        assert_eq!(pos_of("vaccination works", "vaccination"), CoarsePos::Noun);
    }

    #[test]
    fn test_alignment_with_tokenizer() {
        let annotator = LexiconAnnotator::new();
        for sentence in [
            "covid-19 doesn't spread via 5g!",
            "the team's state-of-the-art lab (nih) said so...",
            "@user #science 🚀 https://doi.org/10.1/abc",
        ] {
            assert!(annotator.annotate_aligned(sentence).is_ok(), "{sentence}");
        }
    }
}
