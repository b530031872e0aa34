/// Store integration tests — load, draw, and write back real files.

use npc_dialogue::core::controller::DialogueController;
use npc_dialogue::core::loader::{DialogueLoader, LoadError, MalformedRowPolicy};
use npc_dialogue::core::random::ScriptedIndex;
use npc_dialogue::core::store::{DialogueStore, StoreError};
use npc_dialogue::schema::entity::{EntityId, EntityMoodKey};
use npc_dialogue::schema::mood::Mood;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

const FIXTURE: &str = "tests/fixtures/NPCDialogue.csv";

fn key(id: i32, mood: Mood) -> EntityMoodKey {
    EntityMoodKey::new(EntityId(id), mood)
}

fn fixture_copy(dir: &Path) -> PathBuf {
    let path = dir.join("NPCDialogue.csv");
    std::fs::copy(FIXTURE, &path).unwrap();
    path
}

#[test]
fn fixture_buckets() {
    let store = DialogueStore::open(FIXTURE, &DialogueLoader::default()).unwrap();
    let index = store.index();

    assert_eq!(store.rows().len(), 10);
    assert_eq!(index.len(), 8);
    assert_eq!(
        index.keys(),
        &[
            key(1, Mood::Happy),
            key(1, Mood::Sad),
            key(1, Mood::Angry),
            key(2, Mood::Sad),
            key(2, Mood::Angry),
            key(3, Mood::Happy),
        ]
    );
    assert_eq!(store.views_of(&key(1, Mood::Happy)), Some(vec![0, 3]));
    assert_eq!(store.views_of(&key(3, Mood::Happy)), Some(vec![10, 0]));

    // "Purple" lands in the angry bucket
    let purple = &index.bucket(&key(2, Mood::Angry)).unwrap()[0];
    assert_eq!(purple.text, "You look strange today.");
    assert_eq!(purple.origin_row, 7);
}

#[test]
fn every_entry_points_at_its_own_row() {
    let store = DialogueStore::open(FIXTURE, &DialogueLoader::default()).unwrap();
    let mut rows: Vec<usize> = store.entries().map(|e| e.origin_row).collect();
    rows.sort_unstable();
    rows.dedup();
    assert_eq!(rows.len(), store.index().len());
    assert!(rows.iter().all(|&r| r < store.rows().len()));

    for key in store.index().keys() {
        for entry in store.index().bucket(key).unwrap() {
            assert_eq!(entry.key, *key);
        }
    }
}

#[test]
fn draws_only_come_from_the_requested_mood() {
    let mut store = DialogueStore::open(FIXTURE, &DialogueLoader::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let happy_texts: Vec<String> = store
        .index()
        .bucket(&key(1, Mood::Happy))
        .unwrap()
        .iter()
        .map(|e| e.text.clone())
        .collect();

    for _ in 0..20 {
        let line = store.get_dialogue(key(1, Mood::Happy), &mut rng).unwrap();
        let (_, text) = line.split_once(". ").unwrap();
        assert!(happy_texts.iter().any(|t| t == text), "unexpected line {line}");
    }

    let total: u32 = store.views_of(&key(1, Mood::Happy)).unwrap().iter().sum();
    assert_eq!(total, 3 + 20);
    assert_eq!(store.views_of(&key(1, Mood::Sad)), Some(vec![1]));
    assert_eq!(store.views_of(&key(1, Mood::Angry)), Some(vec![0]));
}

#[test]
fn save_round_trip_pads_missing_views() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture_copy(dir.path());

    let mut store = DialogueStore::open(&path, &DialogueLoader::default()).unwrap();
    store.save().unwrap();

    let saved = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        saved,
        "1,Happy,Morning! Lovely day for it.,0\n\
         1,Happy,Have you tried the bakery yet?,3\n\
         1,Sad,I lost my cat again.,1\n\
         1,Angry,Not now.,0\n\
         2,Sad,The harvest failed this year.,0\n\
         ,Note,rows with a blank id are ignored\n\
         \n\
         2,Purple,You look strange today.,2\n\
         3,Happy,Welcome to the inn!,10\n\
         3,Happy,Rooms are two silver a night.,0\n"
    );

    // Reloading the saved file sees the same counts.
    let reloaded = DialogueStore::open(&path, &DialogueLoader::default()).unwrap();
    assert_eq!(reloaded.views_of(&key(3, Mood::Happy)), Some(vec![10, 0]));
    assert_eq!(reloaded.rows().len(), 10);
}

#[test]
fn counts_persist_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture_copy(dir.path());
    let mut rng = ScriptedIndex::new(vec![1]);

    let mut store = DialogueStore::open(&path, &DialogueLoader::default()).unwrap();
    assert_eq!(
        store.get_dialogue(key(3, Mood::Happy), &mut rng).unwrap(),
        "1. Rooms are two silver a night."
    );
    store.save().unwrap();

    let mut store = DialogueStore::open(&path, &DialogueLoader::default()).unwrap();
    assert_eq!(
        store.get_dialogue(key(3, Mood::Happy), &mut rng).unwrap(),
        "2. Rooms are two silver a night."
    );
    store.save().unwrap();
    store.save().unwrap();

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("3,Happy,Rooms are two silver a night.,2\n"));
    assert!(saved.contains("3,Happy,Welcome to the inn!,10\n"));
}

#[test]
fn unknown_key_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lines.csv");
    std::fs::write(&path, "5,Sad,Alone,4\n").unwrap();

    let mut store = DialogueStore::open(&path, &DialogueLoader::default()).unwrap();
    let err = store
        .get_dialogue(key(9, Mood::Sad), &mut ScriptedIndex::default())
        .unwrap_err();
    assert!(matches!(err, StoreError::KeyNotFound(_)));
    store.save().unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "5,Sad,Alone,4\n");
}

#[test]
fn write_failure_keeps_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture_copy(dir.path());
    let mut store = DialogueStore::open(&path, &DialogueLoader::default()).unwrap();
    store
        .get_dialogue(key(1, Mood::Angry), &mut ScriptedIndex::default())
        .unwrap();

    let bad = dir.path().join("no_such_dir").join("out.csv");
    assert!(matches!(store.save_to(&bad), Err(StoreError::Write { .. })));
    assert_eq!(store.views_of(&key(1, Mood::Angry)), Some(vec![1]));

    store.save().unwrap();
    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("1,Angry,Not now.,1\n"));
}

#[test]
fn malformed_file_policies() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, "1,Happy,Fine\none,Sad,Broken\n2,Sad,Ok,x\n3,Angry,Last\n").unwrap();

    let err = DialogueStore::open(&path, &DialogueLoader::default()).unwrap_err();
    assert!(matches!(err, LoadError::MalformedCell { line: 2, column: 0, .. }));

    let mut store =
        DialogueStore::open(&path, &DialogueLoader::new(MalformedRowPolicy::Skip)).unwrap();
    assert_eq!(store.index().len(), 2);
    store.save().unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "1,Happy,Fine,0\none,Sad,Broken\n2,Sad,Ok,x\n3,Angry,Last,0\n"
    );
}

#[test]
fn controller_with_custom_extension_and_skip_policy() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Town.lines"), "8,Happy,Hi\n8,Happy,Hey,bad\n").unwrap();

    let mut controller = DialogueController::builder()
        .data_dir(dir.path())
        .extension("lines")
        .malformed_rows(MalformedRowPolicy::Skip)
        .seed(11)
        .build()
        .unwrap();
    controller.initialize("Town").unwrap();
    assert_eq!(controller.get_dialogue(8, Mood::Happy).unwrap(), "1. Hi");
    assert_eq!(controller.get_dialogue(8, Mood::Happy).unwrap(), "2. Hi");
    controller.shutdown().unwrap();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("Town.lines")).unwrap(),
        "8,Happy,Hi,2\n8,Happy,Hey,bad\n"
    );
}

#[test]
fn byte_order_mark_is_not_written_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("excel.csv");
    std::fs::write(&path, "\u{feff}1,Happy,Hello there\n2,Sad,Oh no,5\n").unwrap();

    let mut store = DialogueStore::open(&path, &DialogueLoader::default()).unwrap();
    assert_eq!(
        store.get_dialogue(key(1, Mood::Happy), &mut ScriptedIndex::default()).unwrap(),
        "1. Hello there"
    );
    store.save().unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "1,Happy,Hello there,1\n2,Sad,Oh no,5\n"
    );
}
