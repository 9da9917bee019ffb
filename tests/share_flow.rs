// SPDX-License-Identifier: MPL-2.0
//! Share and download flows against scripted platform adapters.

mod common;

use common::{
    id, record_for, Call, RecordingClipboard, RecordingSink, ScriptedGateway, ScriptedOpener,
    ScriptedShare,
};
use fotobox_guest::application::download::{DownloadCoordinator, DownloadOutcome};
use fotobox_guest::application::port::{BinaryPayload, Clipboard, GatewayError, NativeShare, ShareError};
use fotobox_guest::application::share::{
    CopyOutcome, LinkOutcome, Platform, ShareCoordinator, ShareOutcome, ShareTexts, ShareTier,
};
use std::sync::Arc;
use tempfile::tempdir;

const PAGE_URL: &str = "https://fotobox.test/photo/abc123";

fn coordinator(
    gateway: &Arc<ScriptedGateway>,
    native: Option<Arc<dyn NativeShare>>,
    clipboard: Option<Arc<dyn Clipboard>>,
) -> ShareCoordinator {
    ShareCoordinator::new(gateway.clone(), native, clipboard, ShareTexts::default())
}

#[tokio::test]
async fn native_share_sends_photo_bytes() {
    let gateway = Arc::new(ScriptedGateway::new());
    let share = Arc::new(ScriptedShare::answering(Ok(())));
    let coordinator = coordinator(&gateway, Some(share.clone()), None);
    assert_eq!(coordinator.tier(), ShareTier::Native);

    let outcome = coordinator
        .share(record_for(&id("abc123")), PAGE_URL.to_string())
        .await;
    assert_eq!(outcome, ShareOutcome::Shared);

    let payloads = share.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].filename, "abc123.jpg");
    assert_eq!(payloads[0].mime_type, "image/jpeg");
    assert_eq!(payloads[0].title, "Wedding Photo");
    assert_eq!(payloads[0].bytes, b"jpeg bytes".to_vec());
    assert_eq!(
        gateway.calls(),
        vec![Call::FetchBinary("/uploads/abc123.jpg".into())]
    );
}

#[tokio::test]
async fn dismissed_share_sheet_is_neutral() {
    let gateway = Arc::new(ScriptedGateway::new());
    let share = Arc::new(ScriptedShare::answering(Err(ShareError::Cancelled)));
    let clipboard = Arc::new(RecordingClipboard::default());
    let coordinator = coordinator(&gateway, Some(share), Some(clipboard.clone()));

    let outcome = coordinator
        .share(record_for(&id("abc123")), PAGE_URL.to_string())
        .await;
    assert_eq!(outcome, ShareOutcome::Cancelled);
    assert!(clipboard.written().is_empty());
}

#[tokio::test]
async fn share_sheet_failure_is_reported() {
    let gateway = Arc::new(ScriptedGateway::new());
    let share = Arc::new(ScriptedShare::answering(Err(ShareError::Failed(
        "share target crashed".into(),
    ))));
    let coordinator = coordinator(&gateway, Some(share), None);

    let outcome = coordinator
        .share(record_for(&id("abc123")), PAGE_URL.to_string())
        .await;
    assert_eq!(
        outcome,
        ShareOutcome::Failed {
            message: "share target crashed".into()
        }
    );
}

#[tokio::test]
async fn unreachable_photo_fails_before_share_sheet() {
    let gateway = Arc::new(
        ScriptedGateway::new().with_binary(Err(GatewayError::Network("timed out".into()))),
    );
    let share = Arc::new(ScriptedShare::answering(Ok(())));
    let coordinator = coordinator(&gateway, Some(share.clone()), None);

    let outcome = coordinator
        .share(record_for(&id("abc123")), PAGE_URL.to_string())
        .await;
    assert_eq!(
        outcome,
        ShareOutcome::Failed {
            message: "timed out".into()
        }
    );
    assert!(share.payloads().is_empty());
}

#[tokio::test]
async fn without_share_sheet_the_link_is_copied() {
    let gateway = Arc::new(ScriptedGateway::new());
    let clipboard = Arc::new(RecordingClipboard::default());
    let coordinator = coordinator(&gateway, None, Some(clipboard.clone()));
    assert_eq!(coordinator.tier(), ShareTier::Clipboard);

    let outcome = coordinator
        .share(record_for(&id("abc123")), PAGE_URL.to_string())
        .await;
    let links = match outcome {
        ShareOutcome::LinkCopied { links } => links,
        other => panic!("expected the link to be copied, got {other:?}"),
    };

    assert_eq!(clipboard.written(), vec![PAGE_URL.to_string()]);
    let platforms: Vec<Platform> = links.iter().map(|link| link.platform).collect();
    assert_eq!(platforms, Platform::ALL.to_vec());
    assert!(links[1]
        .url
        .ends_with("https%3A%2F%2Ffotobox.test%2Fphoto%2Fabc123"));

    // Link sharing never downloads the photo.
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn refused_clipboard_falls_back_to_manual_link() {
    let gateway = Arc::new(ScriptedGateway::new());
    let clipboard: Arc<dyn Clipboard> = Arc::new(RecordingClipboard::refusing());
    let coordinator = coordinator(&gateway, None, Some(clipboard));

    let outcome = coordinator
        .share(record_for(&id("abc123")), PAGE_URL.to_string())
        .await;
    let (url, links) = match outcome {
        ShareOutcome::ManualLink { url, links } => (url, links),
        other => panic!("expected a manual link, got {other:?}"),
    };
    assert_eq!(url, PAGE_URL);
    assert_eq!(links.len(), Platform::ALL.len());
}

#[tokio::test]
async fn no_clipboard_at_all_means_manual_link() {
    let gateway = Arc::new(ScriptedGateway::new());
    let coordinator = coordinator(&gateway, None, None);
    assert_eq!(coordinator.tier(), ShareTier::ManualLink);

    assert_eq!(
        coordinator.copy_link(PAGE_URL),
        CopyOutcome::Failed {
            url: PAGE_URL.to_string()
        }
    );
}

#[test]
fn manual_share_link_opens_in_the_browser() {
    let gateway = Arc::new(ScriptedGateway::new());
    let clipboard = Arc::new(RecordingClipboard::default());
    let opener = Arc::new(ScriptedOpener::default());
    let coordinator =
        coordinator(&gateway, None, Some(clipboard.clone())).with_opener(opener.clone());
    let link = coordinator.links(PAGE_URL).remove(0);

    assert_eq!(coordinator.open_link(&link.url), LinkOutcome::Opened);
    assert_eq!(opener.opened(), vec![link.url]);
    assert!(clipboard.written().is_empty());
}

#[test]
fn unopenable_link_is_copied_instead() {
    let gateway = Arc::new(ScriptedGateway::new());
    let clipboard = Arc::new(RecordingClipboard::default());
    let coordinator = coordinator(&gateway, None, Some(clipboard.clone()))
        .with_opener(Arc::new(ScriptedOpener::refusing()));
    let link = coordinator.links(PAGE_URL).remove(3);
    assert!(link.url.starts_with("mailto:"));

    assert_eq!(coordinator.open_link(&link.url), LinkOutcome::Copied);
    assert_eq!(clipboard.written(), vec![link.url]);
}

#[test]
fn link_without_opener_or_clipboard_is_left_for_manual_copy() {
    let gateway = Arc::new(ScriptedGateway::new());
    let coordinator = coordinator(&gateway, None, None);

    assert_eq!(
        coordinator.open_link(PAGE_URL),
        LinkOutcome::Failed {
            url: PAGE_URL.to_string()
        }
    );
}

#[tokio::test]
async fn download_saves_under_server_filename_and_releases_staging() {
    let dir = tempdir().expect("failed to create temp dir");
    let gateway = Arc::new(ScriptedGateway::new());
    let sink = Arc::new(RecordingSink::new(dir.path()));
    let coordinator = DownloadCoordinator::new(gateway.clone(), sink.clone(), "wedding-photo.jpg");

    let outcome = coordinator.download(record_for(&id("abc123"))).await;
    let expected = dir.path().join("abc123.jpg");
    assert_eq!(
        outcome,
        DownloadOutcome::Saved {
            path: expected.clone()
        }
    );
    assert_eq!(
        std::fs::read(&expected).expect("saved file should exist"),
        b"jpeg bytes".to_vec()
    );

    let staged = sink.staged();
    assert_eq!(staged.len(), 1);
    assert!(!staged[0].exists(), "staged file should be released");
}

#[tokio::test]
async fn download_without_server_filename_uses_fallback() {
    let dir = tempdir().expect("failed to create temp dir");
    let gateway = Arc::new(ScriptedGateway::new());
    let sink = Arc::new(RecordingSink::new(dir.path()));
    let coordinator = DownloadCoordinator::new(gateway, sink, "wedding-photo.jpg");

    let mut record = record_for(&id("abc123"));
    record.filename = "   ".to_string();

    let outcome = coordinator.download(record).await;
    assert_eq!(
        outcome,
        DownloadOutcome::Saved {
            path: dir.path().join("wedding-photo.jpg")
        }
    );
}

#[tokio::test]
async fn refused_save_still_releases_staging() {
    let dir = tempdir().expect("failed to create temp dir");
    let gateway = Arc::new(ScriptedGateway::new());
    let sink = Arc::new(RecordingSink::read_only(dir.path()));
    let coordinator = DownloadCoordinator::new(gateway, sink.clone(), "wedding-photo.jpg");

    let outcome = coordinator.download(record_for(&id("abc123"))).await;
    assert!(
        matches!(&outcome, DownloadOutcome::Failed { message } if message.contains("read-only")),
        "unexpected outcome: {outcome:?}"
    );
    assert!(!dir.path().join("abc123.jpg").exists());

    let staged = sink.staged();
    assert_eq!(staged.len(), 1);
    assert!(!staged[0].exists(), "staged file should be released");
}

#[tokio::test]
async fn download_fetch_failure_saves_nothing() {
    let dir = tempdir().expect("failed to create temp dir");
    let gateway = Arc::new(ScriptedGateway::new().with_binary(Err(GatewayError::Rejected {
        status: Some(502),
        message: "Bad gateway".into(),
    })));
    let sink = Arc::new(RecordingSink::new(dir.path()));
    let coordinator = DownloadCoordinator::new(gateway, sink.clone(), "wedding-photo.jpg");

    let outcome = coordinator.download(record_for(&id("abc123"))).await;
    assert_eq!(
        outcome,
        DownloadOutcome::Failed {
            message: "Bad gateway".into()
        }
    );
    assert!(sink.staged().is_empty());
}

#[tokio::test]
async fn share_payload_guesses_type_when_undeclared() {
    let gateway = Arc::new(ScriptedGateway::new().with_binary(Ok(BinaryPayload {
        bytes: vec![1, 2, 3],
        content_type: None,
    })));
    let share = Arc::new(ScriptedShare::answering(Ok(())));
    let coordinator = coordinator(&gateway, Some(share.clone()), None);

    let mut record = record_for(&id("abc123"));
    record.filename = "abc123.png".to_string();
    coordinator.share(record, PAGE_URL.to_string()).await;

    assert_eq!(share.payloads()[0].mime_type, "image/png");
}
