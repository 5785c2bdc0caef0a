//! Live page example - a page that keeps changing while the user navigates

use dom::{load_document, MutationRecord, NodeType, OutlineSerializer};
use landmarks::{
    spawn, BadgeBoard, DiagnosticLogger, EngineConfig, LandmarksEngine, OptionsChange, Request,
    Response,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let page = json!({"tag": "body", "children": [
        {"tag": "header", "children": [
            {"tag": "nav", "attributes": {"aria-label": "Site"}}
        ]},
        {"tag": "main", "attributes": {"id": "content"}, "children": [
            {"tag": "form", "attributes": {"role": "search", "aria-label": "Articles"}}
        ]},
        {"tag": "footer"}
    ]});
    let document = Arc::new(RwLock::new(load_document(&page)?));

    let config = EngineConfig::default();
    let (logger, init) = DiagnosticLogger::pending();
    let board = BadgeBoard::new();

    let mut engine = LandmarksEngine::new(config.clone(), document.clone(), logger);
    engine.register_reporter(Box::new(board.reporter(1)));
    let mut events = engine.subscribe();
    let (handle, task) = spawn(engine);

    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("event: {:?}", event);
        }
    });

    // Options arrive a little later, as if read from storage
    sleep(Duration::from_millis(20)).await;
    init.complete(config.debug_info);

    if let Response::Landmarks { landmarks } = handle.request(Request::GetLandmarks).await? {
        print!("{}", OutlineSerializer::new().serialize(&landmarks));
    }
    println!("badge: {:?}", board.text(1));

    // A burst of inserts, like a feed loading
    let main = document.read().await.find_by_id("content").ok_or("no main")?;
    for i in 0..25 {
        {
            let mut doc = document.write().await;
            let item = doc.create_element("section");
            if i % 5 == 0 {
                doc.set_attribute(item, "aria-label", &format!("Story {}", i))?;
            }
            doc.append_child(main, item)?;
        }
        handle
            .notify(vec![MutationRecord::ChildList {
                target: main,
                added: vec![NodeType::Element],
                removed: vec![],
            }])
            .await?;
    }

    init.apply(&OptionsChange {
        debug_info: Some(true),
    });
    sleep(Duration::from_secs(1)).await;
    println!("badge after churn: {:?}", board.text(1));

    for _ in 0..3 {
        println!("{:?}", handle.command("next-landmark").await?);
    }
    println!("{:?}", handle.request(Request::MainLandmark).await?);
    println!("{:?}", handle.request(Request::TriggerRefresh).await?);

    drop(handle);
    task.await??;
    Ok(())
}
