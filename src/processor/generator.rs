//! Word generation on top of the parser, compiler and VM.
//!
//! A pattern is compiled once per call; the VM then runs once per syllable.

use std::collections::HashSet;

use tracing::debug;

use super::ast::{Ast, RefMap};
use super::compiler::compile;
use super::pattern_parser::parse;
use super::vm::{RandomSource, Vm};
use crate::error::GenerateError;
use crate::model::{GenerateOptions, Pattern, Syllables};

pub struct Generator<R> {
    vm: Vm<R>,
}

impl<R: RandomSource> Generator<R> {
    pub fn new(vm: Vm<R>) -> Self {
        Self { vm }
    }

    /// Generate `options.words` words (fewer once duplicates are dropped).
    pub fn generate(
        &mut self,
        pattern: &Pattern,
        options: &GenerateOptions,
    ) -> Result<Vec<String>, GenerateError> {
        if let Syllables::Range { min, max } = options.syllables {
            if min > max {
                return Err(GenerateError::InvalidSyllables { min, max });
            }
        }

        let bytecode = compile_pattern(pattern)?;
        debug!(bytes = bytecode.len(), words = options.words, "compiled pattern");

        let mut words = Vec::with_capacity(options.words);
        for _ in 0..options.words {
            let count = match options.syllables {
                Syllables::Fixed(n) => n as usize,
                Syllables::Range { min, max } => {
                    self.vm.rng_mut().between(min as usize, max as usize)
                }
            };

            let syllables: Vec<String> = (0..count).map(|_| self.vm.run(&bytecode)).collect();
            words.push(syllables.join(&options.syllable_separator));
        }

        if !options.duplicates {
            let mut seen = HashSet::new();
            words.retain(|w| seen.insert(w.clone()));
        }

        Ok(words)
    }
}

/// Parse `pattern` and everything it can reach, then compile it.
pub fn compile_pattern(pattern: &Pattern) -> Result<Vec<u8>, GenerateError> {
    let root = parse(&pattern.source)?;
    let refs = collect_refs(pattern)?;
    Ok(compile(&root, &refs)?)
}

/// Flatten the nested definitions of `pattern` into one map, parsing each
/// name once. The first definition met for a name wins.
fn collect_refs(pattern: &Pattern) -> Result<RefMap, GenerateError> {
    let mut result = RefMap::new();
    let mut stack = vec![&pattern.refs];

    while let Some(current) = stack.pop() {
        for (name, sub) in current {
            if !result.contains_key(name) {
                let ast: Ast = parse(&sub.source)?;
                result.insert(*name, ast);
            }
            stack.push(&sub.refs);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::vm::tests::Scripted;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeMap;

    fn cv_pattern() -> Pattern {
        let nasals = Pattern::new("m/n");
        let consonants = Pattern::with_refs("p/t/k/N", BTreeMap::from([('N', nasals)]));
        let vowels = Pattern::new("a/i/u");
        Pattern::with_refs("(C)V", BTreeMap::from([('C', consonants), ('V', vowels)]))
    }

    fn is_cv(s: &str) -> bool {
        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            [v] => "aiu".contains(*v),
            [c, v] => "ptkmn".contains(*c) && "aiu".contains(*v),
            _ => false,
        }
    }

    #[test]
    fn test_generates_words() {
        let mut generator = Generator::new(Vm::new(StdRng::seed_from_u64(7)));
        let words = generator
            .generate(&cv_pattern(), &GenerateOptions::default())
            .unwrap();

        assert!(!words.is_empty());
        assert!(words.len() <= 100);
        assert!(words.iter().all(|w| is_cv(w)), "{words:?}");

        let unique: HashSet<_> = words.iter().collect();
        assert_eq!(unique.len(), words.len());
    }

    #[test]
    fn test_options_are_honoured() {
        // always drawing 1 makes every syllable identical
        let mut generator = Generator::new(Vm::new(Scripted::default()));
        let options = GenerateOptions {
            words: 20,
            syllables: Syllables::Fixed(4),
            syllable_separator: ".".into(),
            duplicates: true,
        };

        let words = generator.generate(&cv_pattern(), &options).unwrap();

        assert_eq!(words.len(), 20);
        assert!(words.iter().all(|w| w == &words[0]));
        let parts: Vec<&str> = words[0].split('.').collect();
        assert_eq!(parts.len(), 4);
        assert!(parts.iter().all(|p| is_cv(p)), "{parts:?}");
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let mut generator = Generator::new(Vm::new(Scripted::default()));
        let options = GenerateOptions {
            words: 10,
            ..GenerateOptions::default()
        };

        let words = generator.generate(&Pattern::new("ka"), &options).unwrap();
        assert_eq!(words, vec!["ka"]);
    }

    #[test]
    fn test_syllable_range_draws_per_word() {
        let mut generator = Generator::new(Vm::new(Scripted::new(&[2, 3])));
        let options = GenerateOptions {
            words: 2,
            syllables: Syllables::Range { min: 1, max: 3 },
            syllable_separator: "-".into(),
            duplicates: true,
        };

        let words = generator.generate(&Pattern::new("ba"), &options).unwrap();
        assert_eq!(words, vec!["ba-ba", "ba-ba-ba"]);
        assert_eq!(generator.vm.rng_mut().requested, vec![(1, 3), (1, 3)]);
    }

    #[test]
    fn test_inverted_syllable_range_is_rejected() {
        let mut generator = Generator::new(Vm::new(Scripted::default()));
        let options = GenerateOptions {
            syllables: Syllables::Range { min: 3, max: 1 },
            ..GenerateOptions::default()
        };

        let err = generator.generate(&Pattern::new("a"), &options).unwrap_err();
        assert_eq!(err, GenerateError::InvalidSyllables { min: 3, max: 1 });
    }

    #[test]
    fn test_syntax_errors_surface() {
        let mut generator = Generator::new(Vm::new(Scripted::default()));
        let err = generator
            .generate(&Pattern::new("(a"), &GenerateOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "syntax error: unclosed parenthesis");
    }

    #[test]
    fn test_collect_refs_flattens_nested_definitions() {
        let refs = collect_refs(&cv_pattern()).unwrap();
        let names: Vec<char> = refs.keys().copied().collect();
        assert_eq!(names, vec!['C', 'N', 'V']);
    }
}
