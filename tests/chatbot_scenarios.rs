use std::io::Cursor;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use intentbot::cli::{run_chat, training_accuracy};
use intentbot::error::{IntentBotError, Result};
use intentbot::intent::{Catalog, Chatbot, ConversationLog};
use intentbot::ml::{ClassifierConfig, ClassifierModel};

fn sample_path() -> String {
    format!("{}/resources/intents.json", env!("CARGO_MANIFEST_DIR"))
}

fn sample_bot() -> Result<Chatbot> {
    Chatbot::from_path(sample_path(), &ClassifierConfig::default())
}

#[test]
fn greeting_and_goodbye_get_matching_responses() -> Result<()> {
    let catalog = Catalog::from_json_str(
        r#"[
            {"tag": "greeting", "patterns": ["hi", "hello", "hey there"], "responses": ["Hello!", "Hi!"]},
            {"tag": "goodbye", "patterns": ["bye", "goodbye", "see you later"], "responses": ["Bye"]}
        ]"#,
    )?;
    let bot = Chatbot::initialize(catalog, &ClassifierConfig::default())?;
    let mut rng = StdRng::seed_from_u64(3);

    assert_eq!(bot.classify("hello"), "greeting");
    let response = bot.respond("hello", &mut rng)?;
    assert!(response == "Hello!" || response == "Hi!");

    assert_eq!(bot.classify("bye"), "goodbye");
    assert_eq!(bot.respond("bye", &mut rng)?, "Bye");
    Ok(())
}

#[test]
fn training_patterns_are_recalled() -> Result<()> {
    let bot = sample_bot()?;
    let accuracy = training_accuracy(&bot);
    assert!(accuracy >= 0.9, "training-set recall too low: {accuracy}");
    Ok(())
}

#[test]
fn unseen_phrasings_map_to_the_closest_intent() -> Result<()> {
    let bot = sample_bot()?;

    assert_eq!(bot.classify("hello there"), "greeting");
    assert_eq!(bot.classify("thanks so much"), "thanks");
    assert_eq!(bot.classify("tell me a funny joke"), "jokes");
    assert_eq!(bot.classify("where is your store"), "location");
    Ok(())
}

#[test]
fn classify_is_total() -> Result<()> {
    let bot = sample_bot()?;
    let classes = bot.model().classes();

    for text in ["", "   ", "xyzzy plugh", "?!?", "ÜBER straße", "a b c d e f"] {
        let tag = bot.classify(text);
        assert!(classes.iter().any(|class| class == tag), "{text:?} -> {tag}");
        assert!(bot.catalog().contains(tag));
    }
    Ok(())
}

#[test]
fn training_is_deterministic() -> Result<()> {
    let first = sample_bot()?;
    let second = sample_bot()?;

    for text in ["hello", "how much is shipping", "pay with card", "nothing useful"] {
        assert_eq!(first.classify(text), first.classify(text));
        assert_eq!(
            first.model().decision_scores(text),
            second.model().decision_scores(text)
        );
    }
    assert_eq!(first.model().report(), second.model().report());
    Ok(())
}

#[test]
fn seeded_responses_are_reproducible() -> Result<()> {
    let bot = sample_bot()?;
    let mut a = StdRng::seed_from_u64(11);
    let mut b = StdRng::seed_from_u64(11);

    for text in ["hi there", "thanks", "tell me a joke", "opening hours"] {
        assert_eq!(bot.respond(text, &mut a)?, bot.respond(text, &mut b)?);
    }
    Ok(())
}

#[test]
fn model_and_catalog_must_agree_on_tags() -> Result<()> {
    let full = Catalog::from_path(sample_path())?;
    let model = ClassifierModel::fit(&full, &ClassifierConfig::default())?;

    let partial = Catalog::from_json_str(
        r#"[
            {"tag": "greeting", "patterns": ["hi"], "responses": ["Hello!"]},
            {"tag": "goodbye", "patterns": ["bye"], "responses": ["Bye"]}
        ]"#,
    )?;
    let result = Chatbot::from_parts(partial, model);
    assert!(matches!(result, Err(IntentBotError::UnknownTag(_))));
    Ok(())
}

#[test]
fn chat_session_is_logged() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let log = ConversationLog::open(dir.path().join("chat_log.jsonl"));
    let bot = sample_bot()?;
    let mut rng = StdRng::seed_from_u64(5);
    let mut output = Vec::new();

    let exchanges = run_chat(
        &bot,
        Cursor::new("hello\nwhat time do you open\n\nthank you\n"),
        &mut output,
        Some(&log),
        &mut rng,
    )?;
    assert_eq!(exchanges, 3);

    let records = log.records()?;
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].input, "what time do you open");
    assert!(
        bot.catalog()
            .lookup("thanks")?
            .responses
            .contains(&records[2].response)
    );
    assert!(records[0].timestamp <= records[2].timestamp);

    let transcript = String::from_utf8(output)?;
    assert_eq!(transcript.lines().count(), 3);
    assert!(transcript.lines().all(|line| line.starts_with("Chatbot: ")));
    Ok(())
}

#[test]
fn chatbot_can_be_shared_across_threads() -> Result<()> {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Chatbot>();

    let bot = std::sync::Arc::new(sample_bot()?);
    let handles: Vec<_> = ["hello", "shipping cost"]
        .into_iter()
        .map(|text| {
            let bot = std::sync::Arc::clone(&bot);
            std::thread::spawn(move || bot.classify(text).to_string())
        })
        .collect();
    let tags: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(tags, vec!["greeting", "delivery"]);
    Ok(())
}
