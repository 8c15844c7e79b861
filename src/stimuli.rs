use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::condition::WordType;
use crate::error::{ExperimentError, Result};

/// Pair of recall tokens from one row of a category's option columns
pub type OptionPair = [String; 2];

/// Stimulus words and recall options, per category, in table row order.
///
/// Option rows are indexed by row only; row `i` of the options has no link to
/// word `i` of the same category.
#[derive(Debug, Clone, PartialEq)]
pub struct StimulusSet {
    pub word_lists: BTreeMap<WordType, Vec<String>>,
    pub recall_options: BTreeMap<WordType, Vec<OptionPair>>,
}

struct CategoryColumns {
    word_type: WordType,
    word: usize,
    token1: usize,
    token2: usize,
}

impl StimulusSet {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ExperimentError::StimulusFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let column = |name: String| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(ExperimentError::MissingColumn(name))
        };

        let mut columns = Vec::with_capacity(WordType::ALL.len());
        for word_type in WordType::ALL {
            let [token1, token2] = word_type.option_columns();
            columns.push(CategoryColumns {
                word_type,
                word: column(word_type.word_column())?,
                token1: column(token1)?,
                token2: column(token2)?,
            });
        }

        let mut word_lists: BTreeMap<WordType, Vec<String>> = BTreeMap::new();
        let mut recall_options: BTreeMap<WordType, Vec<OptionPair>> = BTreeMap::new();
        for cols in &columns {
            word_lists.insert(cols.word_type, Vec::new());
            recall_options.insert(cols.word_type, Vec::new());
        }

        for record in rdr.records() {
            let record = record?;
            let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();

            for cols in &columns {
                let word = cell(cols.word);
                if !word.is_empty() {
                    word_lists.entry(cols.word_type).or_default().push(word);
                }

                let pair = [cell(cols.token1), cell(cols.token2)];
                recall_options.entry(cols.word_type).or_default().push(pair);
            }
        }

        // Ragged columns: blank option rows past the last filled one are padding.
        // Blank rows before it keep their position.
        for options in recall_options.values_mut() {
            while options.last().is_some_and(is_blank) {
                options.pop();
            }
        }

        let set = Self {
            word_lists,
            recall_options,
        };
        set.validate()?;
        Ok(set)
    }

    fn validate(&self) -> Result<()> {
        for word_type in WordType::ALL {
            if self.words(word_type).is_empty() {
                return Err(ExperimentError::EmptyCategory(word_type));
            }
            let options = self.options(word_type);
            if options.len() < 2 {
                return Err(ExperimentError::TooFewRecallOptions {
                    word_type,
                    found: options.len(),
                });
            }
            if let Some(row) = options[..2].iter().position(is_blank) {
                return Err(ExperimentError::BlankRecallOption { word_type, row });
            }
        }
        Ok(())
    }

    pub fn words(&self, word_type: WordType) -> &[String] {
        self.word_lists
            .get(&word_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn options(&self, word_type: WordType) -> &[OptionPair] {
        self.recall_options
            .get(&word_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn is_blank(pair: &OptionPair) -> bool {
    pair.iter().all(String::is_empty)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use assert_matches::assert_matches;

    pub(crate) const SAMPLE: &str = "\
Cue Words W1,Cue Words W2,Cue Words W3,Cue Words W4,Token1_W1,Token2_W1,Token1_W2,Token2_W2,Token1_W3,Token2_W3,Token1_W4,Token2_W4
chat,pomme,table,livre,chat,chien,pomme,poire,table,chaise,livre,cahier
chien,poire,chaise,cahier,souris,rat,prune,cerise,lit,banc,stylo,crayon
souris,prune,lit,stylo,,,,,,,,
";

    #[test]
    fn test_loads_words_and_options_in_row_order() {
        let set = StimulusSet::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(set.words(WordType::W1), ["chat", "chien", "souris"]);
        assert_eq!(set.words(WordType::W4), ["livre", "cahier", "stylo"]);
        assert_eq!(set.options(WordType::W1).len(), 2);
        assert_eq!(
            set.options(WordType::W2)[1],
            ["prune".to_string(), "cerise".to_string()]
        );
    }

    #[test]
    fn test_ragged_word_column_skips_blank_cells() {
        let csv = "\
Cue Words W1,Cue Words W2,Cue Words W3,Cue Words W4,Token1_W1,Token2_W1,Token1_W2,Token2_W2,Token1_W3,Token2_W3,Token1_W4,Token2_W4
a,b,c,d,a,x,b,x,c,x,d,x
,b2,,,y,z,y,z,y,z,y,z
";
        let set = StimulusSet::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(set.words(WordType::W1), ["a"]);
        assert_eq!(set.words(WordType::W2), ["b", "b2"]);
    }

    #[test]
    fn test_missing_column_is_named() {
        let csv = SAMPLE.replacen("Token2_W3", "Token2_Wx", 1);
        let err = StimulusSet::from_reader(csv.as_bytes()).unwrap_err();
        assert_matches!(err, ExperimentError::MissingColumn(ref name) if name == "Token2_W3");
        assert!(err.is_startup());
    }

    #[test]
    fn test_empty_category_rejected() {
        let csv = "\
Cue Words W1,Cue Words W2,Cue Words W3,Cue Words W4,Token1_W1,Token2_W1,Token1_W2,Token2_W2,Token1_W3,Token2_W3,Token1_W4,Token2_W4
a,,c,d,a,x,b,x,c,x,d,x
a2,,c2,d2,y,z,y,z,y,z,y,z
";
        let err = StimulusSet::from_reader(csv.as_bytes()).unwrap_err();
        assert_matches!(err, ExperimentError::EmptyCategory(WordType::W2));
    }

    #[test]
    fn test_single_option_row_rejected() {
        let csv = "\
Cue Words W1,Cue Words W2,Cue Words W3,Cue Words W4,Token1_W1,Token2_W1,Token1_W2,Token2_W2,Token1_W3,Token2_W3,Token1_W4,Token2_W4
a,b,c,d,a,x,b,x,c,x,d,x
";
        let err = StimulusSet::from_reader(csv.as_bytes()).unwrap_err();
        assert_matches!(
            err,
            ExperimentError::TooFewRecallOptions {
                word_type: WordType::W1,
                found: 1
            }
        );
    }

    #[test]
    fn test_blank_option_row_keeps_its_position() {
        let csv = "\
Cue Words W1,Cue Words W2,Cue Words W3,Cue Words W4,Token1_W1,Token2_W1,Token1_W2,Token2_W2,Token1_W3,Token2_W3,Token1_W4,Token2_W4
a,b,c,d,r0a,r0b,b,x,c,x,d,x
a2,b2,c2,d2,r1a,r1b,y,z,y,z,y,z
a3,b3,c3,d3,,,,,,,,
a4,b4,c4,d4,r3a,r3b,,,,,,
a5,b5,c5,d5,,,,,,,,
";
        let set = StimulusSet::from_reader(csv.as_bytes()).unwrap();
        let options = set.options(WordType::W1);

        assert_eq!(options.len(), 4);
        assert_eq!(options[0], ["r0a".to_string(), "r0b".to_string()]);
        assert_eq!(options[2], [String::new(), String::new()]);
        assert_eq!(options[3], ["r3a".to_string(), "r3b".to_string()]);
        // trailing padding rows are dropped
        assert_eq!(set.options(WordType::W2).len(), 2);
    }

    #[test]
    fn test_blank_first_option_row_rejected_instead_of_shifted() {
        let csv = "\
Cue Words W1,Cue Words W2,Cue Words W3,Cue Words W4,Token1_W1,Token2_W1,Token1_W2,Token2_W2,Token1_W3,Token2_W3,Token1_W4,Token2_W4
a,b,c,d,,,b,x,c,x,d,x
a2,b2,c2,d2,r1a,r1b,y,z,y,z,y,z
a3,b3,c3,d3,r2a,r2b,,,,,,
";
        let err = StimulusSet::from_reader(csv.as_bytes()).unwrap_err();
        assert_matches!(
            err,
            ExperimentError::BlankRecallOption {
                word_type: WordType::W1,
                row: 0
            }
        );
        assert!(err.is_startup());
    }

    #[test]
    fn test_missing_file_is_startup_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StimulusSet::from_path(dir.path().join("nope.csv")).unwrap_err();
        assert_matches!(err, ExperimentError::StimulusFile { .. });
        assert!(err.is_startup());
    }
}
