//! Type-effectiveness calculator.
//!
//! Classifies every attacking type against a defender's 1-2 types using
//! the fetched matchup relations. Multipliers compound multiplicatively
//! across the defender's types; move-level modifiers are out of scope.

use schema::{PokemonType, TypeData};
use std::collections::BTreeSet;

/// Attacking types grouped by how they fare against the defender. Types at
/// exactly 1x appear in none of the sets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeEffectiveness {
    pub weak: BTreeSet<PokemonType>,
    pub resistant: BTreeSet<PokemonType>,
    pub immune: BTreeSet<PokemonType>,
}

impl TypeEffectiveness {
    pub fn is_all_normal(&self) -> bool {
        self.weak.is_empty() && self.resistant.is_empty() && self.immune.is_empty()
    }
}

/// Compute the classification from the defender's matchup records, one per
/// defending type. A `None` entry (failed fetch) contributes no multiplier
/// change and is treated as neutral.
pub fn compute_effectiveness(relations: &[Option<TypeData>]) -> TypeEffectiveness {
    let mut effectiveness = TypeEffectiveness::default();

    for attacking in PokemonType::all() {
        let attacking_name = attacking.to_string();
        let mut multiplier = 1.0_f64;

        for type_data in relations.iter().flatten() {
            let damage = &type_data.damage_relations;
            if damage
                .double_damage_from
                .iter()
                .any(|t| t.name == attacking_name)
            {
                multiplier *= 2.0;
            }
            if damage
                .half_damage_from
                .iter()
                .any(|t| t.name == attacking_name)
            {
                multiplier *= 0.5;
            }
            if damage
                .no_damage_from
                .iter()
                .any(|t| t.name == attacking_name)
            {
                multiplier = 0.0;
            }
        }

        if multiplier >= 2.0 {
            effectiveness.weak.insert(attacking);
        } else if multiplier == 0.0 {
            effectiveness.immune.insert(attacking);
        } else if multiplier < 1.0 {
            effectiveness.resistant.insert(attacking);
        }
    }

    effectiveness
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{DamageRelations, NamedResource};

    fn named(names: &[&str]) -> Vec<NamedResource> {
        names
            .iter()
            .map(|name| NamedResource {
                name: name.to_string(),
                url: String::new(),
            })
            .collect()
    }

    fn type_data(
        name: &str,
        double_from: &[&str],
        half_from: &[&str],
        none_from: &[&str],
    ) -> TypeData {
        TypeData {
            name: name.to_string(),
            damage_relations: DamageRelations {
                double_damage_from: named(double_from),
                half_damage_from: named(half_from),
                no_damage_from: named(none_from),
            },
        }
    }

    #[test]
    fn single_type_classification() {
        let defender = type_data("ghost", &["dark"], &["poison"], &["normal"]);
        let result = compute_effectiveness(&[Some(defender)]);

        assert!(result.weak.contains(&PokemonType::Dark));
        assert!(result.resistant.contains(&PokemonType::Poison));
        assert!(result.immune.contains(&PokemonType::Normal));
        // Everything else stays unclassified (normal damage).
        assert_eq!(result.weak.len(), 1);
        assert_eq!(result.resistant.len(), 1);
        assert_eq!(result.immune.len(), 1);
    }

    #[test]
    fn dual_type_multipliers_compound() {
        // Both types are weak to fire: 2 x 2 = 4 -> still weak.
        // grass is weak to ice but poison resists nothing relevant; 2 x 1 = 2 -> weak.
        // grass is weak to bug, poison halves bug: 2 x 0.5 = 1 -> unclassified.
        let grass = type_data("grass", &["fire", "ice", "bug"], &["water"], &[]);
        let poison = type_data("poison", &["fire"], &["bug"], &[]);
        let result = compute_effectiveness(&[Some(grass), Some(poison)]);

        assert!(result.weak.contains(&PokemonType::Fire));
        assert!(result.weak.contains(&PokemonType::Ice));
        assert!(!result.weak.contains(&PokemonType::Bug));
        assert!(!result.resistant.contains(&PokemonType::Bug));
        assert!(result.resistant.contains(&PokemonType::Water));
    }

    #[test]
    fn immunity_dominates_the_other_relations() {
        // flying takes 0 from ground even if the second type doubles it.
        let flying = type_data("flying", &[], &[], &["ground"]);
        let rock = type_data("rock", &["ground"], &[], &[]);
        let result = compute_effectiveness(&[Some(flying), Some(rock)]);
        assert!(result.immune.contains(&PokemonType::Ground));
        assert!(!result.weak.contains(&PokemonType::Ground));
    }

    #[test]
    fn failed_matchup_fetch_is_neutral() {
        let grass = type_data("grass", &["fire"], &["water"], &[]);
        let with_failure = compute_effectiveness(&[Some(grass.clone()), None]);
        let without = compute_effectiveness(&[Some(grass)]);
        assert_eq!(with_failure, without);
    }

    #[test]
    fn no_relations_means_all_normal() {
        let result = compute_effectiveness(&[None, None]);
        assert!(result.is_all_normal());
    }
}
