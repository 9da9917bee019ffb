// SPDX-License-Identifier: MPL-2.0
//! End-to-end flows through the transformation orchestrator against a
//! scripted photo service.

mod common;

use common::{frame_names, id, Call, ScriptedGateway};
use fotobox_guest::application::orchestrator::{Event, Job, Orchestrator, Phase, PreviewMode};
use fotobox_guest::application::port::GatewayError;
use fotobox_guest::domain::filter::FilterId;
use fotobox_guest::domain::frame::FrameDescriptor;
use fotobox_guest::domain::route::AddressBar;
use std::sync::Arc;

const ORIGIN: &str = "https://fotobox.test";

fn orchestrator(gateway: &Arc<ScriptedGateway>, path: &str) -> Orchestrator {
    Orchestrator::new(gateway.clone(), AddressBar::new(ORIGIN, path))
}

async fn finish(orchestrator: &mut Orchestrator, job: Option<Job>) -> Event {
    let job = job.expect("operation should have started");
    let outcome = job.await;
    orchestrator.handle(outcome)
}

async fn loaded(gateway: &Arc<ScriptedGateway>, raw: &str) -> Orchestrator {
    let mut orchestrator = orchestrator(gateway, &format!("/photo/{raw}"));
    let job = orchestrator.load_photo(id(raw));
    assert_eq!(finish(&mut orchestrator, job).await, Event::Loaded);
    orchestrator
}

#[tokio::test]
async fn filter_on_base_photo_rewrites_address_in_place() {
    let gateway = Arc::new(ScriptedGateway::new());
    let mut orchestrator = loaded(&gateway, "abc123").await;

    orchestrator.select_filter(FilterId::Sepia);
    assert!(matches!(orchestrator.preview(), PreviewMode::Css(d) if d.id == FilterId::Sepia));
    assert!(orchestrator.can_apply_selected_filter());

    let job = orchestrator.apply_filter(FilterId::Sepia);
    assert_eq!(orchestrator.phase(), &Phase::ApplyingFilter(FilterId::Sepia));
    assert_eq!(
        finish(&mut orchestrator, job).await,
        Event::FilterApplied(FilterId::Sepia)
    );

    assert_eq!(orchestrator.phase(), &Phase::Ready);
    assert_eq!(
        orchestrator.identity().map(ToString::to_string).as_deref(),
        Some("filtered_sepia_abc123")
    );
    assert_eq!(orchestrator.base(), Some(&id("abc123")));
    assert_eq!(orchestrator.address_bar().path(), "/photo/filtered_sepia_abc123");
    assert_eq!(
        orchestrator.address_bar().url(),
        "https://fotobox.test/photo/filtered_sepia_abc123"
    );
    assert_eq!(orchestrator.address_bar().history_len(), 1);

    // The persisted derivative is drawn as-is.
    assert_eq!(orchestrator.preview(), PreviewMode::Raw);

    assert_eq!(
        gateway.calls(),
        vec![
            Call::FetchPhoto("abc123".into()),
            Call::ListFrames,
            Call::ApplyFilter {
                base: "abc123".into(),
                filter: "sepia".into()
            },
            Call::FetchPhoto("filtered_sepia_abc123".into()),
        ]
    );
}

#[tokio::test]
async fn deep_link_to_filtered_photo_targets_its_base() {
    let gateway = Arc::new(ScriptedGateway::new());
    let mut orchestrator = loaded(&gateway, "filtered_dream_abc123").await;

    assert_eq!(orchestrator.base(), Some(&id("abc123")));

    orchestrator.select_filter(FilterId::Dream);
    assert_eq!(orchestrator.preview(), PreviewMode::Raw);

    orchestrator.select_filter(FilterId::Romance);
    assert!(matches!(orchestrator.preview(), PreviewMode::Css(d) if d.id == FilterId::Romance));

    let job = orchestrator.apply_filter(FilterId::Romance);
    finish(&mut orchestrator, job).await;

    assert!(gateway.calls().contains(&Call::ApplyFilter {
        base: "abc123".into(),
        filter: "romance".into()
    }));
    assert_eq!(
        orchestrator.address_bar().path(),
        "/photo/filtered_romance_abc123"
    );
}

#[tokio::test]
async fn frame_creates_new_base_for_later_filters() {
    let gateway = Arc::new(ScriptedGateway::new().with_frame_result("xyz789"));
    let mut orchestrator = loaded(&gateway, "abc123").await;
    orchestrator.select_filter(FilterId::Sepia);

    let job = orchestrator.apply_frame("standard");
    assert_eq!(
        orchestrator.phase(),
        &Phase::ApplyingFrame("standard".to_string())
    );
    assert_eq!(
        finish(&mut orchestrator, job).await,
        Event::FrameApplied("standard".to_string())
    );

    assert_eq!(orchestrator.base(), Some(&id("xyz789")));
    assert_eq!(orchestrator.identity(), Some(&id("xyz789")));
    assert_eq!(orchestrator.selected_filter(), FilterId::Original);
    assert_eq!(orchestrator.address_bar().path(), "/photo/xyz789");

    let job = orchestrator.apply_filter(FilterId::Grayscale);
    finish(&mut orchestrator, job).await;

    let calls = gateway.calls();
    assert!(calls.contains(&Call::ApplyFrame {
        base: "abc123".into(),
        overlay: "wedding-frame.png".into()
    }));
    assert!(calls.contains(&Call::ApplyFilter {
        base: "xyz789".into(),
        filter: "grayscale".into()
    }));
    assert_eq!(
        orchestrator.address_bar().path(),
        "/photo/filtered_grayscale_xyz789"
    );
}

#[tokio::test]
async fn framing_a_filtered_photo_sends_its_base() {
    let gateway = Arc::new(ScriptedGateway::new());
    let mut orchestrator = loaded(&gateway, "filtered_sepia_abc123").await;

    let job = orchestrator.apply_frame("instagram");
    finish(&mut orchestrator, job).await;

    assert!(gateway.calls().contains(&Call::ApplyFrame {
        base: "abc123".into(),
        overlay: "instagram-frame.png".into()
    }));
    assert_eq!(orchestrator.base(), Some(&id("framed_abc123")));
}

#[tokio::test]
async fn missing_photo_fails_with_server_message() {
    let gateway = Arc::new(ScriptedGateway::new().with_missing("doesnotexist"));
    let mut orchestrator = orchestrator(&gateway, "/photo/doesnotexist");

    let job = orchestrator.load_photo(id("doesnotexist"));
    assert_eq!(
        finish(&mut orchestrator, job).await,
        Event::LoadFailed {
            message: "Photo not found".to_string()
        }
    );
    assert_eq!(
        orchestrator.phase(),
        &Phase::Failed {
            message: "Photo not found".to_string(),
            not_found: true
        }
    );
    assert!(orchestrator.record().is_none());

    // Failed is terminal for the session.
    assert!(orchestrator.load_photo(id("abc123")).is_none());
    assert!(orchestrator.apply_filter(FilterId::Sepia).is_none());
}

#[tokio::test]
async fn second_request_is_refused_while_one_is_in_flight() {
    let gateway = Arc::new(ScriptedGateway::new());
    let mut orchestrator = loaded(&gateway, "abc123").await;

    let pending = orchestrator.apply_filter(FilterId::Sepia);
    assert!(pending.is_some());
    assert!(orchestrator.is_busy());
    assert!(!orchestrator.can_apply_selected_filter());

    assert!(orchestrator.apply_filter(FilterId::Dream).is_none());
    assert!(orchestrator.apply_frame("standard").is_none());
    assert!(orchestrator.load_photo(id("other")).is_none());
    assert_eq!(orchestrator.phase(), &Phase::ApplyingFilter(FilterId::Sepia));

    finish(&mut orchestrator, pending).await;
    assert!(!orchestrator.is_busy());

    let apply_calls = gateway
        .calls()
        .into_iter()
        .filter(|call| matches!(call, Call::ApplyFilter { .. } | Call::ApplyFrame { .. }))
        .count();
    assert_eq!(apply_calls, 1);
}

#[tokio::test]
async fn original_is_never_sent_to_the_service() {
    let gateway = Arc::new(ScriptedGateway::new());
    let mut orchestrator = loaded(&gateway, "abc123").await;

    orchestrator.select_filter(FilterId::Original);
    assert!(!orchestrator.can_apply_selected_filter());
    assert!(orchestrator.apply_filter(FilterId::Original).is_none());
    assert_eq!(orchestrator.phase(), &Phase::Ready);
}

#[tokio::test]
async fn filter_failure_keeps_confirmed_photo() {
    let gateway = Arc::new(ScriptedGateway::new().with_filter_error(GatewayError::Rejected {
        status: Some(500),
        message: "Failed to apply filter".to_string(),
    }));
    let mut orchestrator = loaded(&gateway, "abc123").await;

    let job = orchestrator.apply_filter(FilterId::Forever);
    assert_eq!(
        finish(&mut orchestrator, job).await,
        Event::OperationFailed {
            message: "Failed to apply filter".to_string()
        }
    );
    assert_eq!(orchestrator.phase(), &Phase::Ready);
    assert_eq!(orchestrator.identity(), Some(&id("abc123")));
    assert_eq!(orchestrator.address_bar().path(), "/photo/abc123");
}

#[tokio::test]
async fn frame_failure_keeps_base_and_selection() {
    let gateway = Arc::new(
        ScriptedGateway::new().with_frame_error(GatewayError::Network("connection reset".into())),
    );
    let mut orchestrator = loaded(&gateway, "abc123").await;
    orchestrator.select_filter(FilterId::Dream);

    let job = orchestrator.apply_frame("standard");
    assert_eq!(
        finish(&mut orchestrator, job).await,
        Event::OperationFailed {
            message: "connection reset".to_string()
        }
    );
    assert_eq!(orchestrator.base(), Some(&id("abc123")));
    assert_eq!(orchestrator.selected_filter(), FilterId::Dream);
}

#[tokio::test]
async fn filtered_photo_that_cannot_be_fetched_keeps_confirmed_photo() {
    let gateway = Arc::new(ScriptedGateway::new().with_missing("filtered_sepia_abc123"));
    let mut orchestrator = loaded(&gateway, "abc123").await;

    let job = orchestrator.apply_filter(FilterId::Sepia);
    assert_eq!(
        finish(&mut orchestrator, job).await,
        Event::OperationFailed {
            message: "Photo not found".to_string()
        }
    );
    assert_eq!(orchestrator.phase(), &Phase::Ready);
    assert_eq!(orchestrator.identity(), Some(&id("abc123")));
    assert_eq!(orchestrator.base(), Some(&id("abc123")));
    assert_eq!(
        orchestrator.record().map(|record| record.url.as_str()),
        Some("/uploads/abc123.jpg")
    );
    assert_eq!(orchestrator.address_bar().path(), "/photo/abc123");
    assert_eq!(
        gateway.calls().last(),
        Some(&Call::FetchPhoto("filtered_sepia_abc123".into()))
    );
}

#[tokio::test]
async fn framed_photo_that_cannot_be_fetched_keeps_base() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_frame_result("xyz789")
            .with_missing("xyz789"),
    );
    let mut orchestrator = loaded(&gateway, "abc123").await;
    orchestrator.select_filter(FilterId::Dream);

    let job = orchestrator.apply_frame("standard");
    assert_eq!(
        finish(&mut orchestrator, job).await,
        Event::OperationFailed {
            message: "Photo not found".to_string()
        }
    );
    assert_eq!(orchestrator.phase(), &Phase::Ready);
    assert_eq!(orchestrator.base(), Some(&id("abc123")));
    assert_eq!(orchestrator.identity(), Some(&id("abc123")));
    assert_eq!(orchestrator.selected_filter(), FilterId::Dream);
    assert_eq!(orchestrator.address_bar().path(), "/photo/abc123");
}

#[tokio::test]
async fn outcome_from_previous_session_is_discarded() {
    let gateway = Arc::new(ScriptedGateway::new());
    let mut previous = orchestrator(&gateway, "/photo/abc123");
    let stale = previous.load_photo(id("abc123")).expect("load should start");

    let mut current = orchestrator(&gateway, "/photo/xyz789");
    let fresh = current.load_photo(id("xyz789"));

    assert_eq!(current.handle(stale.await), Event::Ignored);
    assert_eq!(current.phase(), &Phase::Loading);

    assert_eq!(finish(&mut current, fresh).await, Event::Loaded);
    assert_eq!(current.identity(), Some(&id("xyz789")));
}

#[tokio::test]
async fn catalog_adds_only_custom_frames() {
    let gateway = Arc::new(ScriptedGateway::new().with_catalog(vec![
        FrameDescriptor::custom("wedding-frame.png", None),
        FrameDescriptor::custom("instagram-frame.png", None),
        FrameDescriptor::custom("gold_hearts.png", Some("/frames/gold_hearts.png".into())),
    ]));
    let mut orchestrator = loaded(&gateway, "abc123").await;

    assert_eq!(orchestrator.custom_frames().len(), 1);
    assert_eq!(orchestrator.custom_frames()[0].label(), "gold hearts");

    let frames = orchestrator.frames();
    assert_eq!(frames.len(), 3);
    let names = frame_names(&frames);
    assert_eq!(names.get("standard"), Some(&true));
    assert_eq!(names.get("instagram"), Some(&true));
    assert_eq!(names.get("gold_hearts.png"), Some(&false));

    let job = orchestrator.apply_frame("gold_hearts.png");
    finish(&mut orchestrator, job).await;
    assert!(gateway.calls().contains(&Call::ApplyFrame {
        base: "abc123".into(),
        overlay: "gold_hearts.png".into()
    }));
}

#[tokio::test]
async fn empty_catalog_still_offers_builtins() {
    let gateway = Arc::new(ScriptedGateway::new());
    let orchestrator = loaded(&gateway, "abc123").await;

    assert!(orchestrator.custom_frames().is_empty());
    let frames = orchestrator.frames();
    assert_eq!(frames.len(), 2);
    assert!(frames.iter().all(|frame| frame.is_builtin));
    assert_eq!(orchestrator.active_frame(), Some("standard"));
}
