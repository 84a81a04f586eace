//! Every sentence the tutor says, in French.

use crate::session::Score;
use domain_solve::{
    component::{Component, ComponentKind},
    condition::Condition,
};

/// The closing question of a finished session.
const ANOTHER_ONE: &str = "Souhaites-tu essayer une autre fonction ?";

pub fn not_recognized() -> String {
    "Je n'ai pas trouvé de fonction dans ton message. Écris-la sous la forme f(x) = ..., par \
     exemple f(x) = 1/√(x-2).".to_string()
}

pub fn unreadable_function(expr: &str) -> String {
    format!(
        "Je n'arrive pas à lire l'expression « {} ». Vérifie les parenthèses et les opérateurs, \
         puis renvoie la fonction.",
        expr,
    )
}

pub fn defined_everywhere(declaration: &str) -> String {
    format!(
        "La fonction {} ne contient ni racine carrée, ni logarithme, ni dénominateur : elle est \
         définie pour tout réel x. Son domaine de définition est D = ℝ.",
        declaration,
    )
}

pub fn reset() -> String {
    "C'est noté, on recommence. Envoie-moi une nouvelle fonction sous la forme f(x) = ...".to_string()
}

pub fn introduction(declaration: &str, count: usize) -> String {
    if count == 1 {
        format!(
            "Commençons par analyser la fonction {} étape par étape. Un seul élément restreint son \
             domaine de définition.",
            declaration,
        )
    } else {
        format!(
            "Commençons par analyser la fonction {} étape par étape. {} éléments restreignent son \
             domaine de définition.",
            declaration,
            count,
        )
    }
}

/// Asks for the condition of the component at the given (1-based) step.
pub fn ask_condition(step: usize, total: usize, component: &Component) -> String {
    match component.kind {
        ComponentKind::Root => format!(
            "Étape {}/{} : la racine carrée {}. Quelle condition doit vérifier {} pour que cette \
             racine soit définie ?",
            step, total, component, component.argument,
        ),
        ComponentKind::Log => format!(
            "Étape {}/{} : le logarithme {}. Quelle condition doit vérifier {} pour que ce \
             logarithme soit défini ?",
            step, total, component, component.argument,
        ),
        ComponentKind::Denominator => format!(
            "Étape {}/{} : le dénominateur {}. Quelle condition doit-il vérifier ?",
            step, total, component,
        ),
    }
}

/// The rule that gives the condition of each kind of component.
pub fn rule(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Root => "Une racine carrée n'est définie que si ce qu'elle contient est \
                                positif ou nul (≥ 0).",
        ComponentKind::Log => "Un logarithme n'est défini que si son argument est strictement \
                               positif (> 0).",
        ComponentKind::Denominator => "Un dénominateur ne doit jamais s'annuler (≠ 0).",
    }
}

pub fn condition_correct(condition: &Condition) -> String {
    format!("Exactement ! La condition est {}.", condition)
}

pub fn condition_missed(condition: &Condition) -> String {
    format!("Pas tout à fait. {} La condition est donc {}.", rule(condition.kind), condition)
}

pub fn ask_solution(condition: &Condition) -> String {
    format!("Résous maintenant {} : pour quelles valeurs de x cette condition est-elle vérifiée ?", condition)
}

pub fn solution_correct(set: &str) -> String {
    format!("Parfait ! L'ensemble des solutions est {}.", set)
}

pub fn solution_wrong(set: &str) -> String {
    format!("Ce n'est pas le bon ensemble. L'ensemble des solutions est {}.", set)
}

pub fn solution_revealed(set: &str) -> String {
    format!("Pas de souci, voici la réponse : l'ensemble des solutions est {}.", set)
}

pub fn solution_unreadable(set: &str) -> String {
    format!("Je n'ai pas compris ta réponse. L'ensemble des solutions est {}.", set)
}

pub fn solution_unverifiable(condition: &Condition) -> String {
    format!(
        "Je ne sais pas résoudre {} de manière exacte, je ne peux donc pas vérifier ta réponse. On \
         garde cette condition telle quelle.",
        condition,
    )
}

/// One line of the recap: the component, its condition and, if it is known, its solution set.
pub fn recap_line(component: &Component, condition: &Condition, set: Option<&str>) -> String {
    let name = match component.kind {
        ComponentKind::Root | ComponentKind::Log => component.to_string(),
        ComponentKind::Denominator => format!("{} {}", component.kind.name(), component),
    };
    match set {
        Some(set) => format!("- {} : {}, soit x ∈ {}", name, condition, set),
        None => format!("- {} : {} (non résolue)", name, condition),
    }
}

pub fn recap(lines: &[String]) -> String {
    format!("Récapitulons :\n{}\nQuel est alors le domaine de définition de f ?", lines.join("\n"))
}

pub fn score(score: &Score) -> String {
    let noun = if score.correct <= 1 { "réponse" } else { "réponses" };
    format!("Tu as trouvé {} {} sur {}.", score.correct, noun, score.total)
}

pub fn domain_correct(set: &str, score: &Score) -> String {
    format!(
        "Bravo ! Le domaine de définition de f est D = {}. {} {}",
        set, self::score(score), ANOTHER_ONE,
    )
}

pub fn domain_wrong(set: &str, score: &Score) -> String {
    format!(
        "Ce n'est pas le bon domaine. Le domaine de définition de f est D = {}. {} {}",
        set, self::score(score), ANOTHER_ONE,
    )
}

pub fn domain_unreadable(set: &str, score: &Score) -> String {
    format!(
        "Je n'ai pas compris ta réponse. Le domaine de définition de f est D = {}. {} {}",
        set, self::score(score), ANOTHER_ONE,
    )
}

pub fn domain_as_conditions(conditions: &[&Condition], score: &Score) -> String {
    let conditions = conditions.iter()
        .map(|condition| condition.to_string())
        .collect::<Vec<_>>()
        .join(" et ");
    format!(
        "Je ne peux pas calculer ce domaine de manière exacte. Le domaine de définition de f est \
         l'ensemble des réels x tels que {}. {} {}",
        conditions, self::score(score), ANOTHER_ONE,
    )
}
