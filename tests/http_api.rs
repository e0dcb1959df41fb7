use std::fs;
use std::net::TcpListener;

use hyper::{Client, StatusCode, Uri, body};
use serde_json::Value;
use tempfile::tempdir;

use vqa_gallery::{LoadOptions, QueryEngine, load_dataset, server};

async fn get(client: &Client<hyper::client::HttpConnector>, url: String) -> (StatusCode, Value) {
    let uri: Uri = url.parse().unwrap();
    let response = client.get(uri).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body()).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn api_round_trip_over_a_real_socket() {
    let temp = tempdir().unwrap();
    let images = temp.path().join("ep_1/images");
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("frame_0.png"), b"png bytes").unwrap();

    let source = temp.path().join("vqa_data.json");
    fs::write(
        &source,
        r#"{"vqa_items": [
            {"unique_id": "q0", "episode_dir": "ep_1",
             "question": {"text": "How many?", "image_ids": ["frame_0"]},
             "choices": [{"text": "one", "is_correct": true}],
             "metadata": {"tag": "counting"}},
            {"unique_id": "q1", "episode_dir": "ep_1",
             "question": {"text": "Where?", "image_ids": []},
             "choices": [{"text": "left", "is_correct": false},
                         {"text": "right", "is_correct": true}],
             "metadata": {"tag": "spatial"}},
            {"unique_id": "q2", "episode_dir": "ep_2",
             "question": {"text": "What color?", "image_ids": []},
             "choices": [{"text": "red", "is_correct": true}],
             "metadata": {"tag": "counting"}}
        ]}"#,
    )
    .unwrap();

    let snapshot = load_dataset(
        &source,
        temp.path(),
        &LoadOptions::default().with_shuffle(false),
    )
    .unwrap();
    let engine = QueryEngine::new(snapshot);

    // Bind before spawning so requests queue until the server accepts.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server::serve_on(engine, listener).await;
    });
    let client = Client::new();
    let base = format!("http://{addr}");

    let (status, page) = get(&client, format!("{base}/api/vqa_data?limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["page"], 0);
    assert_eq!(page["limit"], 2);
    assert_eq!(page["data"].as_array().unwrap().len(), 2);

    let (status, filtered) = get(
        &client,
        format!("{base}/api/vqa_data?category=counting&episode=ep_2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered["total"], 1);
    assert_eq!(filtered["data"][0]["unique_id"], "q2");

    let (status, item) = get(&client, format!("{base}/api/vqa/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["unique_id"], "q1");

    let (status, item) = get(&client, format!("{base}/api/vqa/id/q2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["episode_dir"], "ep_2");

    let (status, _) = get(&client, format!("{base}/api/vqa/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, episodes) = get(&client, format!("{base}/api/episodes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(episodes["episodes"], serde_json::json!(["ep_1", "ep_2"]));

    let (status, categories) = get(&client, format!("{base}/api/categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        categories["categories"],
        serde_json::json!(["counting", "spatial"])
    );

    let (status, stats) = get(&client, format!("{base}/api/statistics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_items"], 3);
    assert_eq!(stats["correct_answer_distribution"]["B"], 1);

    // Image bytes come back verbatim with the PNG content type.
    let uri: Uri = format!("{base}/api/images/frame_0").parse().unwrap();
    let response = client.get(uri).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[hyper::header::CONTENT_TYPE],
        "image/png"
    );
    let bytes = body::to_bytes(response.into_body()).await.unwrap();
    assert_eq!(&bytes[..], b"png bytes");

    let (status, error) = get(&client, format!("{base}/api/images/..%2Fsecrets")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].as_str().unwrap().contains("image id"));

    let (status, _) = get(&client, format!("{base}/api/images/never_registered")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&client, format!("{base}/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
