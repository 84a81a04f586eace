use domain_solve::notation::Notation;
use domain_tutor::{process_turn, store::InMemoryStore, Phase, SessionStore, Tutor, TutorConfig};

fn tutor() -> Tutor<InMemoryStore> {
    Tutor::new(InMemoryStore::new())
}

#[test]
fn correct_dialogue() {
    let tutor = tutor();

    let reply = tutor.process_turn("s", "Bonjour, je dois trouver le domaine de f(x) = 1/√(x-2)");
    assert!(reply.starts_with("Commençons par analyser la fonction f(x) = 1/sqrt(x-2)"), "{}", reply);
    assert!(reply.contains("2 éléments restreignent"));
    assert!(reply.contains("Étape 1/2 : la racine carrée √(x - 2)."));

    let reply = tutor.process_turn("s", "x - 2 >= 0");
    assert!(reply.starts_with("Exactement ! La condition est x - 2 ≥ 0."), "{}", reply);

    let reply = tutor.process_turn("s", "[2;+inf[");
    assert!(reply.starts_with("Parfait ! L'ensemble des solutions est [2,+∞[."), "{}", reply);
    assert!(reply.contains("Étape 2/2 : le dénominateur √(x - 2)."));

    let reply = tutor.process_turn("s", "différent de 0");
    assert!(reply.starts_with("Exactement !"), "{}", reply);

    let reply = tutor.process_turn("s", "x > 2");
    assert!(reply.starts_with("Parfait ! L'ensemble des solutions est ]2,+∞[."), "{}", reply);
    assert!(reply.contains("Récapitulons :"));
    assert!(reply.ends_with("Quel est alors le domaine de définition de f ?"));

    let reply = tutor.process_turn("s", "D = ]2 ; +∞[");
    assert!(reply.starts_with("Bravo ! Le domaine de définition de f est D = ]2,+∞[."), "{}", reply);
    assert!(reply.contains("Tu as trouvé 5 réponses sur 5."));
    assert_eq!(tutor.store().get("s"), None);
}

#[test]
fn unrestricted_function() {
    let tutor = tutor();
    let reply = tutor.process_turn("s", "f(x) = 3x^2 - 2x + 1");
    assert!(reply.contains("définie pour tout réel x"), "{}", reply);
    assert!(reply.contains("D = ℝ"));
    assert_eq!(tutor.store().get("s"), None);
}

#[test]
fn no_function_in_message() {
    let tutor = tutor();
    let (reply, diagnostics) = tutor.process_turn_verbose("s", "bonjour !");
    assert!(reply.starts_with("Je n'ai pas trouvé de fonction"), "{}", reply);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].source, "bonjour !");
    assert_eq!(tutor.store().get("s"), None);
}

#[test]
fn unreadable_function() {
    let tutor = tutor();
    let (reply, diagnostics) = tutor.process_turn_verbose("s", "f(x) = sqrt(x - 2");
    assert!(reply.starts_with("Je n'arrive pas à lire l'expression"), "{}", reply);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(tutor.store().get("s"), None);
}

#[test]
fn conversations_are_independent() {
    let tutor = tutor();
    std::thread::scope(|scope| {
        for id in ["s1", "s2"] {
            let tutor = &tutor;
            scope.spawn(move || {
                tutor.process_turn(id, "f(x) = ln(x)");
                tutor.process_turn(id, "> 0");
                tutor.process_turn(id, "x > 0");
                let reply = tutor.process_turn(id, "]0,+∞[");
                assert!(reply.starts_with("Bravo !"), "{}", reply);
                assert!(reply.contains("Tu as trouvé 3 réponses sur 3."));
            });
        }
    });
    assert_eq!(tutor.store().active_sessions(), 0);
}

#[test]
fn interleaved_conversations() {
    let tutor = tutor();
    tutor.process_turn("s1", "f(x) = sqrt(x)");
    tutor.process_turn("s2", "f(x) = 1/(x+1)");
    tutor.process_turn("s1", "≥ 0");

    let s1 = tutor.store().get("s1").unwrap();
    let s2 = tutor.store().get("s2").unwrap();
    assert_eq!(s1.phase(), Phase::AwaitingSolution);
    assert_eq!(s2.phase(), Phase::AwaitingCondition);
    assert_eq!(s2.function(), "1/(x+1)");
}

#[test]
fn new_declaration_restarts() {
    let tutor = tutor();
    tutor.process_turn("s", "f(x) = sqrt(x)");
    tutor.process_turn("s", "≥ 0");

    let reply = tutor.process_turn("s", "En fait, f(x) = log(x - 1)");
    assert!(reply.contains("la fonction f(x) = log(x-1)"), "{}", reply);
    let session = tutor.store().get("s").unwrap();
    assert_eq!(session.function(), "log(x-1)");
    assert_eq!(session.phase(), Phase::AwaitingCondition);
    assert_eq!(session.cursor(), 0);
}

#[test]
fn unreadable_domain_ends_the_session() {
    let tutor = tutor();
    tutor.process_turn("s", "f(x) = sqrt(4 - x)");
    tutor.process_turn("s", "≥ 0");
    tutor.process_turn("s", "x ≤ 4");

    let (reply, diagnostics) = tutor.process_turn_verbose("s", "banane");
    assert!(reply.starts_with("Je n'ai pas compris ta réponse."), "{}", reply);
    assert!(reply.contains("D = ]-∞,4]"));
    assert!(reply.contains("Tu as trouvé 2 réponses sur 3."));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].source, "banane");
    assert_eq!(tutor.store().get("s"), None);
}

#[test]
fn reset_command() {
    let tutor = tutor();
    tutor.process_turn("s", "f(x) = sqrt(x)");
    let reply = tutor.process_turn("s", "/Recommencer");
    assert!(reply.starts_with("C'est noté, on recommence."), "{}", reply);
    assert_eq!(tutor.store().get("s"), None);
}

#[test]
fn missed_condition_is_explained() {
    let tutor = tutor();
    tutor.process_turn("s", "f(x) = ln(2x + 1)");
    let reply = tutor.process_turn("s", "≥ 0");
    assert!(reply.starts_with("Pas tout à fait."), "{}", reply);
    assert!(reply.contains("strictement positif"));

    let session = tutor.store().get("s").unwrap();
    assert!(session.retry());
    assert_eq!(session.phase(), Phase::AwaitingSolution);

    let reply = tutor.process_turn("s", "x > -1/2");
    assert!(reply.starts_with("Parfait ! L'ensemble des solutions est ]-1/2,+∞[."), "{}", reply);
    assert!(!tutor.store().get("s").unwrap().retry());
}

#[test]
fn giving_up_reveals_the_answer() {
    let tutor = tutor();
    tutor.process_turn("s", "f(x) = sqrt(x^2 - 1)");
    tutor.process_turn("s", "positif ou nul");
    let reply = tutor.process_turn("s", "je ne sais pas");
    assert!(reply.starts_with("Pas de souci, voici la réponse"), "{}", reply);
    assert!(reply.contains("]-∞,-1] ∪ [1,+∞["));
}

#[test]
fn unsolvable_condition() {
    let tutor = tutor();
    let (_, diagnostics) = tutor.process_turn_verbose("s", "f(x) = sqrt(x^3 - 2)");
    assert_eq!(diagnostics.len(), 1);

    tutor.process_turn("s", "≥ 0");
    let reply = tutor.process_turn("s", "x ≥ 2^(1/3)");
    assert!(reply.starts_with("Je ne sais pas résoudre"), "{}", reply);
    assert!(reply.contains("(non résolue)"));

    let reply = tutor.process_turn("s", "[1,+∞[");
    assert!(reply.contains("l'ensemble des réels x tels que"), "{}", reply);
    assert_eq!(tutor.store().get("s"), None);
}

#[test]
fn international_notation() {
    let config = TutorConfig::default()
        .into_builder()
        .notation(Notation::International)
        .show_chain(true)
        .build();
    let tutor = Tutor::with_config(InMemoryStore::new(), config);

    tutor.process_turn("s", "f(x) = sqrt(x)");
    tutor.process_turn("s", "≥ 0");
    let reply = tutor.process_turn("s", "x ≥ 0");
    assert!(reply.starts_with("Parfait ! L'ensemble des solutions est [0, +∞) (c'est-à-dire x ≥ 0)."), "{}", reply);
}

#[test]
fn free_function_uses_defaults() {
    let store = InMemoryStore::new();
    let reply = process_turn(&store, "s", "f(x) = 1/x");
    assert!(reply.contains("Étape 1/1 : le dénominateur x."), "{}", reply);
    assert!(store.get("s").is_some());
}

#[test]
fn finished_conversations_leave_nothing_behind() {
    let tutor = tutor();

    tutor.process_turn("done", "f(x) = log(x)");
    tutor.process_turn("done", "> 0");
    tutor.process_turn("done", "x > 0");
    tutor.process_turn("done", "]0,+∞[");

    tutor.process_turn("reset", "f(x) = sqrt(x)");
    tutor.process_turn("reset", "stop");

    tutor.process_turn("hello", "bonjour");
    tutor.process_turn("everywhere", "f(x) = x + 1");
    tutor.store().get("unknown");

    assert_eq!(tutor.store().active_sessions(), 0);
    assert_eq!(tutor.store().tracked_conversations(), 0);

    tutor.process_turn("open", "f(x) = 1/x");
    assert_eq!(tutor.store().tracked_conversations(), 1);
}
