use casebook_model::{Case, Submission, Timestamp};
use casebook_store::{CollectionPaths, JsonFileStore, RecordStore};
use tempfile::tempdir;

#[tokio::test]
async fn submissions_survive_a_save_load_cycle_verbatim() {
    let dir = tempdir().expect("tempdir");
    let paths = CollectionPaths::under(dir.path());
    std::fs::write(
        &paths.focus_group,
        r#"[{
            "username": "alice",
            "email": "a@x.com",
            "submittedAt": "2024-01-01T00:00:00Z",
            "cases": [{"group": "G1", "values": [{"value": "Fairness", "definition": "d"}], "tensions": []}],
            "isEditedVersion": false,
            "sessionName": "pilot"
        }]"#,
    )
    .expect("seed file");

    let store: JsonFileStore<Submission> = JsonFileStore::new(&paths.focus_group);
    let loaded = store.load().await;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].key().to_string(), "alice|a@x.com|2024-01-01T00:00:00Z");

    store.save(&loaded).await.expect("save");
    let reloaded = store.load().await;
    assert_eq!(reloaded, loaded);

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&paths.focus_group).expect("read")).expect("json");
    assert_eq!(raw[0]["submittedAt"], "2024-01-01T00:00:00Z");
    assert_eq!(raw[0]["sessionName"], "pilot");
}

#[tokio::test]
async fn saves_from_two_handles_last_writer_wins() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("focus_group_case_studies.json");
    let first: JsonFileStore<Submission> = JsonFileStore::new(&path);
    let second: JsonFileStore<Submission> = JsonFileStore::new(&path);

    let base = vec![Submission::new("a", "a@x.com", Timestamp::from_raw("t0"))];
    first.save(&base).await.expect("seed");

    let mut from_first = first.load().await;
    let mut from_second = second.load().await;
    from_first.push(Submission::new("b", "b@x.com", Timestamp::from_raw("t1")));
    from_second.push(
        Submission::new("c", "c@x.com", Timestamp::from_raw("t2"))
            .with_cases(vec![Case::new("G")]),
    );

    first.save(&from_first).await.expect("first save");
    second.save(&from_second).await.expect("second save");

    let names: Vec<String> = first.load().await.into_iter().map(|s| s.username).collect();
    assert_eq!(names, vec!["a".to_string(), "c".to_string()]);
}

#[tokio::test]
async fn null_payload_fields_do_not_cost_the_collection() {
    let dir = tempdir().expect("tempdir");
    let paths = CollectionPaths::under(dir.path());
    std::fs::write(
        &paths.focus_group,
        r#"[
            {
                "username": "alice",
                "email": "a@x.com",
                "submittedAt": "2024-01-01T00:00:00Z",
                "cases": [{"group": "G1", "values": [{"value": "Fairness", "definition": null}], "tensions": null}]
            },
            {
                "username": "carl",
                "email": "c@x.com",
                "submittedAt": "2024-01-02T00:00:00Z",
                "cases": "not a list"
            },
            {
                "username": "dana",
                "email": null,
                "submittedAt": 1704153600000,
                "cases": null,
                "isEditedVersion": null
            }
        ]"#,
    )
    .expect("seed file");

    let store: JsonFileStore<Submission> = JsonFileStore::new(&paths.focus_group);
    let mut loaded = store.load().await;
    let names: Vec<&str> = loaded.iter().map(|s| s.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "dana"]);
    assert_eq!(loaded[0].cases[0].values[0].definition, "");

    loaded.push(Submission::new("bob", "b@x.com", Timestamp::from_raw("2024-06-01T12:00:00.000Z")));
    store.save(&loaded).await.expect("save");

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&paths.focus_group).expect("read")).expect("json");
    let usernames: Vec<&str> = raw
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|r| r["username"].as_str())
        .collect();
    assert_eq!(usernames, vec!["alice", "dana", "bob", "carl"]);
    assert_eq!(raw[3]["cases"], "not a list");
}
