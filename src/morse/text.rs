// src/morse/text.rs  -  Text <-> display Morse translation
use crate::morse::CodeTable;
use serde::{Deserialize, Serialize};

/// Which letter case travels without a modifier in case-sensitive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DefaultCase {
    /// Lowercase is unmarked; uppercase letters are preceded by the upper-case modifier.
    #[default]
    Lower,
    /// Uppercase is unmarked; lowercase letters are preceded by the lower-case modifier.
    Upper,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslatorConfig {
    /// Emitted for characters missing from the table.
    pub replacement:     char,
    /// Placed between encoded words.
    pub word_separator:  String,
    pub case_sensitive:  bool,
    pub default_case:    DefaultCase,
    pub upper_modifier:  char,
    pub lower_modifier:  char,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            replacement:    '#',
            word_separator: "  ".into(),
            case_sensitive: false,
            default_case:   DefaultCase::Lower,
            upper_modifier: '+',
            lower_modifier: '&',
        }
    }
}

/// Converts plain text to display Morse (`.`/dash symbols, one space between
/// characters, the word separator between words) and back.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    table:  CodeTable,
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { table: CodeTable::new(), config }
    }

    pub fn with_table(table: CodeTable, config: TranslatorConfig) -> Self {
        Self { table, config }
    }

    pub fn table(&self) -> &CodeTable { &self.table }
    pub fn table_mut(&mut self) -> &mut CodeTable { &mut self.table }
    pub fn config(&self) -> &TranslatorConfig { &self.config }
    pub fn config_mut(&mut self) -> &mut TranslatorConfig { &mut self.config }

    /// Encode `text`. Unknown characters become the replacement symbol.
    pub fn to_morse(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let text = if self.config.case_sensitive {
            text.to_string()
        } else {
            text.chars().map(canonical_case).collect()
        };

        split_words(&text)
            .into_iter()
            .map(|word| self.encode_word(word))
            .collect::<Vec<_>>()
            .join(&self.config.word_separator)
    }

    /// Decode display Morse. Replacement symbols and unknown codes are dropped.
    pub fn from_morse(&self, morse: &str) -> String {
        let morse = morse.replace(&format!("{} ", self.config.replacement), "");
        let words: Vec<&str> = if self.config.word_separator.is_empty() {
            vec![morse.as_str()]
        } else {
            morse.split(self.config.word_separator.as_str()).collect()
        };

        words
            .into_iter()
            .map(|word| self.decode_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn encode_word(&self, word: &str) -> String {
        word.chars()
            .map(|ch| self.encode_char(ch))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn encode_char(&self, ch: char) -> String {
        let key = canonical_case(ch);
        let Ok(code) = self.table.to_display(key) else {
            return self.replacement_code();
        };
        if !self.config.case_sensitive || !ch.is_alphabetic() {
            return code;
        }

        let marker = match (self.config.default_case, ch.is_lowercase()) {
            (DefaultCase::Lower, false) => self.config.upper_modifier,
            (DefaultCase::Upper, true)  => self.config.lower_modifier,
            _                           => return code,
        };
        // A modifier missing from a custom table is sent as the bare symbol.
        let marker = self.table.to_display(marker).unwrap_or_else(|_| marker.to_string());
        format!("{marker} {code}")
    }

    fn replacement_code(&self) -> String {
        let r = self.config.replacement;
        self.table.to_display(r).unwrap_or_else(|_| r.to_string())
    }

    fn decode_word(&self, word: &str) -> String {
        let decoded: Vec<Option<char>> = word
            .split(' ')
            .map(|code| self.table.from_display(code).ok())
            .collect();

        if !self.config.case_sensitive {
            return decoded.into_iter().flatten().collect();
        }

        let marker = match self.config.default_case {
            DefaultCase::Lower => self.config.upper_modifier,
            DefaultCase::Upper => self.config.lower_modifier,
        };
        let mut out = String::with_capacity(decoded.len());
        let mut it = decoded.into_iter();
        while let Some(slot) = it.next() {
            if slot == Some(marker) {
                // The modifier applies to the next slot, even an undecodable one.
                if let Some(Some(ch)) = it.next() {
                    self.push_cased(&mut out, ch, true);
                }
            } else if let Some(ch) = slot {
                self.push_cased(&mut out, ch, false);
            }
        }
        out
    }

    fn push_cased(&self, out: &mut String, ch: char, marked: bool) {
        let upper = match self.config.default_case {
            DefaultCase::Lower => marked,
            DefaultCase::Upper => !marked,
        };
        if upper { out.extend(ch.to_uppercase()); } else { out.extend(ch.to_lowercase()); }
    }
}

/// Uppercase form of `ch` when it is a single character, else `ch` itself.
fn canonical_case(ch: char) -> char {
    let mut up = ch.to_uppercase();
    match (up.next(), up.next()) {
        (Some(u), None) => u,
        _               => ch,
    }
}

/// Split on whitespace runs. Leading/trailing whitespace yields an empty first/last word.
fn split_words(text: &str) -> Vec<&str> {
    let pieces: Vec<&str> = text.split(char::is_whitespace).collect();
    let last = pieces.len() - 1;
    pieces
        .into_iter()
        .enumerate()
        .filter(|&(i, w)| !w.is_empty() || i == 0 || i == last)
        .map(|(_, w)| w)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default() -> Translator { Translator::default() }

    fn case_sensitive(default_case: DefaultCase) -> Translator {
        let table = CodeTable::with_dash(':').unwrap();
        Translator::with_table(table, TranslatorConfig {
            case_sensitive: true,
            default_case,
            ..Default::default()
        })
    }

    #[test]
    fn empty_text() {
        assert_eq!(default().to_morse(""), "");
        assert_eq!(default().from_morse(""), "");
    }

    #[test]
    fn encodes_name() {
        assert_eq!(
            default().to_morse("Espen Hovlandsdal"),
            ". ... .--. . -.  .... --- ...- .-.. .- -. -.. ... -.. .- .-.."
        );
    }

    #[test]
    fn inserts_replacement() {
        assert_eq!(
            default().to_morse("Vaffler er gødt"),
            "...- .- ..-. ..-. .-.. . .-.  . .-.  --. # -.. -"
        );
    }

    #[test]
    fn alternative_replacement() {
        let mut t = default();
        t.config_mut().replacement = '¤';
        let morse = t.to_morse("Vaffler er gødt");
        assert_eq!(morse, "...- .- ..-. ..-. .-.. . .-.  . .-.  --. ¤ -.. -");
        assert_eq!(t.from_morse(&morse), "VAFFLER ER GDT");
    }

    #[test]
    fn replacement_in_table_is_sent_as_its_code() {
        let mut t = default();
        t.config_mut().replacement = '?';
        assert_eq!(t.to_morse("gø"), "--. ..--..");
    }

    #[test]
    fn alternative_word_separator() {
        let mut t = default();
        t.config_mut().word_separator = "¤".into();
        let morse = t.to_morse("Vaffler er godt");
        assert_eq!(morse, "...- .- ..-. ..-. .-.. . .-.¤. .-.¤--. --- -.. -");
        assert_eq!(t.from_morse(&morse), "VAFFLER ER GODT");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(default().to_morse("e \t\n t"), ".  -");
    }

    #[test]
    fn outer_whitespace_keeps_empty_words() {
        // Empty outer words become empty groups, not "#  .  #", so the spacing survives decoding.
        assert_eq!(default().to_morse(" e "), "  .  ");
        assert_eq!(default().from_morse("  .  "), " E ");
    }

    #[test]
    fn decodes_name() {
        assert_eq!(
            default().from_morse(". ... .--. . -.  .... --- ...- .-.. .- -. -.. ... -.. .- .-.."),
            "ESPEN HOVLANDSDAL"
        );
    }

    #[test]
    fn decode_drops_replacement_and_unknown_codes() {
        assert_eq!(
            default().from_morse("...- .- ..-. ..-. .-.. . .-.  . .-.  --. # -.. -"),
            "VAFFLER ER GDT"
        );
        assert_eq!(default().from_morse(".- ........... -"), "AT");
    }

    #[test]
    fn replacement_at_end_is_dropped() {
        let mut t = default();
        t.config_mut().replacement = '¤';
        assert_eq!(t.from_morse(&t.to_morse("AVSLAG%")), "AVSLAG");
    }

    #[test]
    fn custom_table_entry() {
        let mut t = default();
        t.table_mut().set('%', "001100110011").unwrap();
        assert_eq!(t.from_morse(&t.to_morse("Avslag -30%")), "AVSLAG -30%");
    }

    #[test]
    fn split_words_matches_whitespace_runs() {
        assert_eq!(split_words(""), vec![""]);
        assert_eq!(split_words("a  b"), vec!["a", "b"]);
        assert_eq!(split_words("   "), vec!["", ""]);
        assert_eq!(split_words(" a"), vec!["", "a"]);
    }

    const MIXED: &str = "1F2hWApGiUUXs98DvOQ9XqVYfvaqQSU0mRSgOAn7t8SrfJ1cD";

    const UPPER_UNMARKED: &str = ".:::: ..:. ..::: .:... .... .:: .: .:... .::. ::. .:... .. ..: ..: :..: .:... ... ::::. :::.. :.. .:... ...: ::: ::.: ::::. :..: .:... ::.: ...: :.:: .:... ..:. .:... ...: .:... .: .:... ::.: ::.: ... ..: ::::: .:... :: .:. ... .:... ::. ::: .: .:... :. ::... .:... : :::.. ... .:... .:. .:... ..:. .::: .:::: .:... :.:. :..";

    const LOWER_UNMARKED: &str = ".:::: .:.:. ..:. ..::: .... .:.:. .:: .:.:. .: .::. .:.:. ::. .. .:.:. ..: .:.:. ..: .:.:. :..: ... ::::. :::.. .:.:. :.. ...: .:.:. ::: .:.:. ::.: ::::. .:.:. :..: ::.: .:.:. ...: .:.:. :.:: ..:. ...: .: ::.: .:.:. ::.: .:.:. ... .:.:. ..: ::::: :: .:.:. .:. .:.:. ... ::. .:.:. ::: .:.:. .: :. ::... : :::.. .:.:. ... .:. ..:. .:.:. .::: .:::: :.:. .:.:. :..";

    #[test]
    fn case_sensitive_upper_unmarked_encode() {
        assert_eq!(case_sensitive(DefaultCase::Upper).to_morse(MIXED), UPPER_UNMARKED);
    }

    #[test]
    fn case_sensitive_upper_unmarked_decode() {
        assert_eq!(case_sensitive(DefaultCase::Upper).from_morse(UPPER_UNMARKED), MIXED);
    }

    #[test]
    fn case_sensitive_lower_unmarked_round_trip() {
        let t = case_sensitive(DefaultCase::Lower);
        assert_eq!(t.to_morse(MIXED), LOWER_UNMARKED);
        assert_eq!(t.from_morse(LOWER_UNMARKED), MIXED);
    }

    #[test]
    fn case_sensitive_keeps_upper_word() {
        let t = case_sensitive(DefaultCase::Lower);
        assert_eq!(t.from_morse(&t.to_morse("AVSLAG")), "AVSLAG");
        assert_eq!(t.from_morse(&t.to_morse("Hello World")), "Hello World");
    }

    #[test]
    fn case_sensitive_unknown_char_is_replaced() {
        let t = case_sensitive(DefaultCase::Upper);
        assert_eq!(t.to_morse("gø"), ".:... ::. #");
        assert_eq!(t.from_morse(".:... ::. #"), "g");
    }

    #[test]
    fn dangling_modifier_is_dropped() {
        let t = case_sensitive(DefaultCase::Lower);
        assert_eq!(t.from_morse(".: .:.:."), "a");
    }
}
