//! Request router - turns requests into engine calls and replies
//!
//! "Nothing to show" outcomes (empty page, out-of-range index, no main
//! landmark) become user notices instead of errors. Unknown request kinds
//! are errors for the caller.

use serde_json::Value;

use crate::engine::{Focused, LandmarksEngine};
use crate::error::{EngineError, Result};
use crate::protocol::{Notice, Request, Response};

/// Handle one decoded request
pub async fn route(engine: &mut LandmarksEngine, request: Request) -> Result<Response> {
    tracing::debug!("[Router] {}", request.kind());

    match request {
        Request::GetLandmarks => Ok(Response::Landmarks {
            landmarks: engine.describe_all(),
        }),
        Request::FocusLandmark { index } => focused(engine.focus_index(index).await),
        Request::NextLandmark => focused(engine.focus_next().await),
        Request::PrevLandmark => focused(engine.focus_previous().await),
        Request::MainLandmark => Ok(match engine.focus_main().await {
            Some(f) => focused_response(f),
            None => Response::Notice {
                notice: Notice::NoMainLandmarkFound,
            },
        }),
        Request::TriggerRefresh => {
            let count = engine.refresh().await?;
            Ok(Response::Refreshed { count })
        }
    }
}

/// Decode and handle a raw request message
pub async fn route_value(engine: &mut LandmarksEngine, message: &Value) -> Result<Response> {
    let request = Request::from_value(message)?;
    route(engine, request).await
}

fn focused_response(f: Focused) -> Response {
    Response::Focused {
        index: f.index,
        highlighted: f.highlighted,
    }
}

fn focused(result: Result<Focused>) -> Result<Response> {
    match result {
        Ok(f) => Ok(focused_response(f)),
        Err(EngineError::NoLandmarks) | Err(EngineError::IndexOutOfRange { .. }) => {
            Ok(Response::Notice {
                notice: Notice::NoLandmarksFound,
            })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::logger::DiagnosticLogger;
    use dom::{load_document, DomArena, LandmarkRole};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    async fn engine_for(page: Value) -> (LandmarksEngine, Arc<RwLock<DomArena>>) {
        let arena = load_document(&page).unwrap();
        let document = Arc::new(RwLock::new(arena));
        let (logger, _init) = DiagnosticLogger::ready_with(false);
        let mut engine = LandmarksEngine::new(EngineConfig::default(), document.clone(), logger);
        engine.bootstrap().await.unwrap();
        (engine, document)
    }

    fn sample_page() -> Value {
        json!({"tag": "body", "children": [
            {"tag": "nav", "attributes": {"aria-label": "Site"}},
            {"tag": "main", "children": [
                {"tag": "form", "attributes": {"role": "search"}}
            ]},
            {"tag": "main"}
        ]})
    }

    #[tokio::test]
    async fn test_get_landmarks() {
        let (mut engine, _) = engine_for(sample_page()).await;
        let response = route(&mut engine, Request::GetLandmarks).await.unwrap();
        let Response::Landmarks { landmarks } = response else {
            panic!("expected landmarks, got {:?}", response);
        };
        let roles: Vec<_> = landmarks.iter().map(|s| (s.role, s.depth)).collect();
        assert_eq!(
            roles,
            vec![
                (LandmarkRole::Navigation, 0),
                (LandmarkRole::Main, 0),
                (LandmarkRole::Search, 1),
                (LandmarkRole::Main, 0),
            ]
        );
        assert_eq!(landmarks[0].label, "Site");
    }

    #[tokio::test]
    async fn test_navigation_sequence() {
        let (mut engine, _) = engine_for(sample_page()).await;
        let mut visited = Vec::new();
        for _ in 0..5 {
            match route(&mut engine, Request::NextLandmark).await.unwrap() {
                Response::Focused { index, .. } => visited.push(index),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(visited, vec![0, 1, 2, 3, 0]);

        assert_eq!(
            route(&mut engine, Request::PrevLandmark).await.unwrap(),
            Response::Focused {
                index: 3,
                highlighted: true
            }
        );
    }

    #[tokio::test]
    async fn test_prev_from_fresh_index_lands_on_last() {
        let (mut engine, _) = engine_for(sample_page()).await;
        assert_eq!(
            route(&mut engine, Request::PrevLandmark).await.unwrap(),
            Response::Focused {
                index: 3,
                highlighted: true
            }
        );
    }

    #[tokio::test]
    async fn test_main_landmark_is_first_main() {
        let (mut engine, _) = engine_for(sample_page()).await;
        assert_eq!(
            route(&mut engine, Request::MainLandmark).await.unwrap(),
            Response::Focused {
                index: 1,
                highlighted: true
            }
        );
        // Does not move the cursor
        assert_eq!(engine.cursor().current(), None);
    }

    #[tokio::test]
    async fn test_notices() {
        let (mut engine, _) = engine_for(json!({"tag": "body", "children": [{"tag": "div"}]})).await;
        let nothing = Response::Notice {
            notice: Notice::NoLandmarksFound,
        };
        assert_eq!(route(&mut engine, Request::NextLandmark).await.unwrap(), nothing);
        assert_eq!(
            route(&mut engine, Request::FocusLandmark { index: 0 }).await.unwrap(),
            nothing
        );
        assert_eq!(
            route(&mut engine, Request::MainLandmark).await.unwrap(),
            Response::Notice {
                notice: Notice::NoMainLandmarkFound
            }
        );

        let (mut engine, _) = engine_for(sample_page()).await;
        assert_eq!(
            route(&mut engine, Request::FocusLandmark { index: 9 }).await.unwrap(),
            nothing
        );
    }

    #[tokio::test]
    async fn test_trigger_refresh_picks_up_changes() {
        let (mut engine, document) = engine_for(sample_page()).await;
        route(&mut engine, Request::NextLandmark).await.unwrap();

        {
            let mut doc = document.write().await;
            let body = doc.find_by_tag("body")[0];
            let aside = doc.create_element("aside");
            doc.append_child(body, aside).unwrap();
        }
        assert_eq!(
            route(&mut engine, Request::TriggerRefresh).await.unwrap(),
            Response::Refreshed { count: 5 }
        );
        assert!(document.read().await.outlined().is_empty());
        assert_eq!(engine.cursor().current(), None);
    }

    #[tokio::test]
    async fn test_route_value() {
        let (mut engine, _) = engine_for(sample_page()).await;
        assert_eq!(
            route_value(&mut engine, &json!({"request": "focus-landmark", "index": 2}))
                .await
                .unwrap(),
            Response::Focused {
                index: 2,
                highlighted: true
            }
        );
        assert!(matches!(
            route_value(&mut engine, &json!({"request": "self-destruct"})).await,
            Err(EngineError::UnknownRequest(_))
        ));
    }
}
