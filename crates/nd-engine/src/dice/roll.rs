//! Dice roll results and aggregation.

use serde::{Deserialize, Serialize};

use super::{Die, Face};
use crate::evaluate::{Evaluation, evaluate};
use crate::symbols::SymbolCounts;

/// The result of rolling a single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The type of die that was rolled.
    pub die: Die,
    /// Index into `die.faces()` of the face that came up.
    pub face: usize,
}

impl DieResult {
    /// The face that came up, or `None` if `face` is not a valid index
    /// for this die.
    pub fn face(&self) -> Option<Face> {
        self.die.faces().get(self.face).copied()
    }
}

/// The result of rolling an entire dice pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results.
    pub dice: Vec<DieResult>,
}

impl RollResult {
    /// Every rolled symbol, summed across all dice. Results with an
    /// invalid face index contribute nothing.
    pub fn symbols(&self) -> SymbolCounts {
        self.dice
            .iter()
            .filter_map(DieResult::face)
            .fold(SymbolCounts::new(), |acc, face| acc + face.counts())
    }

    /// Net symbols of this roll with `extra` layered on top.
    pub fn evaluate(&self, extra: &SymbolCounts) -> Evaluation {
        evaluate(&self.symbols(), extra)
    }

    /// Number of dice in the result.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self
            .dice
            .iter()
            .map(|d| match d.face() {
                Some(face) if face.is_blank() => format!("{}:-", d.die.denomination()),
                Some(face) => format!("{}:{face}", d.die.denomination()),
                None => format!("{}:?", d.die.denomination()),
            })
            .collect();
        write!(f, "[{}] = {}", faces.join(", "), self.symbols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Symbol;

    fn make_result(values: &[(Die, usize)]) -> RollResult {
        RollResult {
            dice: values
                .iter()
                .map(|&(die, face)| DieResult { die, face })
                .collect(),
        }
    }

    #[test]
    fn symbols_are_summed() {
        // Ability face 3 is two successes, Difficulty face 7 is failure + threat.
        let r = make_result(&[(Die::Ability, 3), (Die::Difficulty, 7)]);
        let symbols = r.symbols();
        assert_eq!(symbols.get(Symbol::Success), 2);
        assert_eq!(symbols.get(Symbol::Failure), 1);
        assert_eq!(symbols.get(Symbol::Threat), 1);
    }

    #[test]
    fn evaluate_nets_symbols() {
        let r = make_result(&[(Die::Ability, 3), (Die::Difficulty, 7)]);
        let net = r.evaluate(&SymbolCounts::new());
        assert_eq!(net.get(Symbol::Success), 1);
        assert_eq!(net.get(Symbol::Threat), 1);
    }

    #[test]
    fn empty_result() {
        let r = RollResult::default();
        assert_eq!(r.count(), 0);
        assert!(r.symbols().is_empty());
        assert_eq!(r.to_string(), "[] = ");
    }

    #[test]
    fn display() {
        let r = make_result(&[(Die::Boost, 0), (Die::Proficiency, 11)]);
        assert_eq!(r.to_string(), "[b:-, p:1t] = 1t");
    }

    #[test]
    fn out_of_range_face_is_ignored() {
        let json = r#"{"dice":[{"die":"Boost","face":6},{"die":"Ability","face":1}]}"#;
        let r: RollResult = serde_json::from_str(json).unwrap();
        assert!(r.dice[0].face().is_none());
        assert_eq!(r.symbols().get(Symbol::Success), 1);
        assert_eq!(r.to_string(), "[b:?, a:1s] = 1s");
    }
}
