//! Preview presenter
//!
//! Owns what the preview surface currently shows and which source text
//! produced it, and keeps it in sync with the user's preferences.
//!
//! # Overlapping conversions
//!
//! The most recent request wins. Every conversion started through the
//! presenter takes a generation ticket and cancels the request before it.
//! A result that arrives with an outdated ticket is dropped without touching
//! the surface or the state.
//!
//! A preference change during a user-initiated conversion takes that
//! conversion over. It reconverts the pending text rather than the last
//! displayed one, and reports the outcome like the user request would have.
//!
//! # Notices
//!
//! User-initiated conversions ([`PreviewPresenter::convert_and_show`]) report
//! every failure. Reconversions triggered by a preference change
//! ([`PreviewPresenter::on_preference_changed`]) are silent.

use md2wechat_application::{
    ConvertDocumentUseCase, CopyContentUseCase, CopyError, CopyOutcome, NoticeLevel,
    PreviewSurface,
};
use md2wechat_domain::{
    ConversionError, ConversionResult, ConvertedHtml, Preferences, PreviewState,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// What happened to one conversion routed through the presenter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// New HTML is on the surface
    Displayed,
    /// The conversion failed; the surface is unchanged
    Failed(ConversionError),
    /// A newer conversion started before this one finished
    Superseded,
    /// Nothing to reconvert
    Skipped,
}

/// Conversion currently waiting on the service
struct InFlight {
    cancel: CancellationToken,
    /// Text of a user-initiated conversion not yet displayed
    user_source: Option<String>,
}

/// Presenter for a single preview pane
pub struct PreviewPresenter {
    workflow: ConvertDocumentUseCase,
    surface: Arc<dyn PreviewSurface>,
    state: Mutex<PreviewState>,
    generation: AtomicU64,
    in_flight: Mutex<Option<InFlight>>,
}

impl PreviewPresenter {
    pub fn new(workflow: ConvertDocumentUseCase, surface: Arc<dyn PreviewSurface>) -> Self {
        Self {
            workflow,
            surface,
            state: Mutex::new(PreviewState::new()),
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        }
    }

    fn state_guard(&self) -> MutexGuard<'_, PreviewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current preview state
    pub fn state(&self) -> PreviewState {
        self.state_guard().clone()
    }

    pub fn current_html(&self) -> Option<ConvertedHtml> {
        self.state_guard().last_html().cloned()
    }

    /// Display a conversion result produced for `source_text`
    ///
    /// Success replaces the displayed HTML, scrolls to the top and records
    /// the source text. Failure leaves everything as it was and notifies the
    /// user.
    pub fn show(&self, result: ConversionResult, source_text: &str) -> Presentation {
        match result {
            Ok(html) => {
                self.surface.render_html(html.as_str());
                self.surface.reset_scroll();
                self.state_guard().record(source_text, html);
                self.surface
                    .notify(NoticeLevel::Success, "Conversion succeeded");
                Presentation::Displayed
            }
            Err(e) => {
                self.surface.notify(NoticeLevel::Error, &e.user_message());
                Presentation::Failed(e)
            }
        }
    }

    /// Convert `source_text` on behalf of the user and display the outcome
    pub async fn convert_and_show(
        &self,
        source_text: &str,
        preferences: &Preferences,
    ) -> Presentation {
        let (ticket, cancel, _) = self.begin(Some(source_text.to_string()));
        let result = self
            .workflow
            .convert_cancellable(source_text, preferences, &cancel)
            .await;

        if !self.is_current(ticket) {
            debug!("Dropping result of superseded conversion #{}", ticket);
            return Presentation::Superseded;
        }
        self.finish(ticket);
        self.show(result, source_text)
    }

    /// Reconvert the last source text after a preference change
    ///
    /// Failures keep the previous HTML and are not reported to the user,
    /// unless the refresh took over a pending user-initiated conversion.
    pub async fn on_preference_changed(&self, preferences: &Preferences) -> Presentation {
        let has_pending_user_source = self
            .in_flight_guard()
            .as_ref()
            .is_some_and(|in_flight| in_flight.user_source.is_some());
        let last_source_text = self.state_guard().last_source_text().map(str::to_string);
        if !has_pending_user_source && last_source_text.is_none() {
            debug!("No previous conversion, skipping refresh");
            return Presentation::Skipped;
        }

        let (ticket, cancel, user_source) = self.begin(None);
        let Some(source_text) = user_source.clone().or(last_source_text) else {
            return Presentation::Skipped;
        };
        let result = self
            .workflow
            .convert_cancellable(&source_text, preferences, &cancel)
            .await;

        if !self.is_current(ticket) {
            debug!("Dropping result of superseded refresh #{}", ticket);
            return Presentation::Superseded;
        }
        self.finish(ticket);

        if user_source.is_some() {
            debug!("Refresh #{} completes a pending conversion", ticket);
            return self.show(result, &source_text);
        }

        match result {
            Ok(html) => {
                self.surface.render_html(html.as_str());
                self.surface.reset_scroll();
                self.state_guard().replace_html(html);
                Presentation::Displayed
            }
            Err(e) => {
                debug!("Background refresh failed, keeping previous preview: {}", e);
                Presentation::Failed(e)
            }
        }
    }

    /// Copy the displayed HTML, with its text content as fallback
    pub async fn copy_displayed(
        &self,
        copier: &CopyContentUseCase,
    ) -> Result<CopyOutcome, CopyError> {
        let html = self.current_html().ok_or(CopyError::NothingToCopy)?;
        let plain_text = self.surface.text_content(html.as_str());
        copier.execute(html.as_str(), &plain_text).await
    }

    fn in_flight_guard(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new generation, cancelling whatever is in flight
    ///
    /// Without a `user_source` of its own, the new conversion inherits the
    /// pending user text of the one it cancels. Returns the user text the
    /// new conversion is responsible for.
    fn begin(&self, user_source: Option<String>) -> (u64, CancellationToken, Option<String>) {
        let mut in_flight = self.in_flight_guard();
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();

        let inherited = in_flight.take().and_then(|previous| {
            previous.cancel.cancel();
            previous.user_source
        });
        let user_source = user_source.or(inherited);

        *in_flight = Some(InFlight {
            cancel: cancel.clone(),
            user_source: user_source.clone(),
        });
        (ticket, cancel, user_source)
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    fn finish(&self, ticket: u64) {
        let mut in_flight = self.in_flight_guard();
        if self.is_current(ticket) {
            in_flight.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use md2wechat_application::{
        ClipboardError, ClipboardPort, ConversionTransport, ServiceParams, TransportError,
        TransportRequest, TransportResponse,
    };
    use md2wechat_domain::{FontSize, PreferenceUpdate};
    use std::collections::VecDeque;
    use std::time::Duration;

    // === Mock implementations ===

    type Scripted = (Duration, Result<TransportResponse, TransportError>);

    struct MockTransport {
        responses: Mutex<VecDeque<Scripted>>,
        requests: Mutex<Vec<TransportRequest>>,
    }

    impl MockTransport {
        fn new(responses: Vec<Scripted>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn last_body(&self) -> serde_json::Value {
            let requests = self.requests.lock().unwrap();
            serde_json::from_str(&requests.last().unwrap().body).unwrap()
        }
    }

    #[async_trait]
    impl ConversionTransport for MockTransport {
        async fn post_json(
            &self,
            request: &TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            let scripted = self.responses.lock().unwrap().pop_front();
            match scripted {
                Some((delay, response)) => {
                    tokio::time::sleep(delay).await;
                    response
                }
                None => Err(TransportError::Other("no more responses".to_string())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        rendered: Mutex<Vec<String>>,
        scroll_resets: Mutex<usize>,
        notices: Mutex<Vec<(NoticeLevel, String)>>,
    }

    impl RecordingSurface {
        fn displayed(&self) -> Option<String> {
            self.rendered.lock().unwrap().last().cloned()
        }

        fn errors(&self) -> Vec<String> {
            self.notices
                .lock()
                .unwrap()
                .iter()
                .filter(|(level, _)| *level == NoticeLevel::Error)
                .map(|(_, msg)| msg.clone())
                .collect()
        }
    }

    impl PreviewSurface for RecordingSurface {
        fn render_html(&self, html: &str) {
            self.rendered.lock().unwrap().push(html.to_string());
        }

        fn reset_scroll(&self) {
            *self.scroll_resets.lock().unwrap() += 1;
        }

        fn notify(&self, level: NoticeLevel, message: &str) {
            self.notices.lock().unwrap().push((level, message.to_string()));
        }

        fn text_content(&self, html: &str) -> String {
            format!("text of {}", html)
        }
    }

    struct RecordingClipboard {
        written: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ClipboardPort for RecordingClipboard {
        async fn write_rich(&self, html: &str, plain_text: &str) -> Result<(), ClipboardError> {
            self.written
                .lock()
                .unwrap()
                .push((html.to_string(), plain_text.to_string()));
            Ok(())
        }

        async fn write_selection(&self, _html: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable)
        }

        async fn write_text(&self, _plain_text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable)
        }
    }

    fn ok(html: &str) -> Scripted {
        (
            Duration::ZERO,
            Ok(TransportResponse::new(
                200,
                serde_json::json!({"code": 0, "data": {"html": html}}).to_string(),
            )),
        )
    }

    fn business_error() -> Scripted {
        (
            Duration::ZERO,
            Ok(TransportResponse::new(200, r#"{"code":5,"msg":"bad theme"}"#)),
        )
    }

    fn prefs() -> Preferences {
        Preferences {
            api_key: "wme_test".to_string(),
            ..Default::default()
        }
    }

    fn setup(
        responses: Vec<Scripted>,
    ) -> (PreviewPresenter, Arc<MockTransport>, Arc<RecordingSurface>) {
        let transport = Arc::new(MockTransport::new(responses));
        let surface = Arc::new(RecordingSurface::default());
        let workflow = ConvertDocumentUseCase::new(transport.clone(), ServiceParams::default());
        let presenter = PreviewPresenter::new(workflow, surface.clone());
        (presenter, transport, surface)
    }

    #[tokio::test]
    async fn test_show_success_renders_and_records() {
        let (presenter, _, surface) = setup(vec![]);
        let outcome = presenter.show(Ok(ConvertedHtml::new("<p>x</p>")), "x");

        assert_eq!(outcome, Presentation::Displayed);
        assert_eq!(surface.displayed().as_deref(), Some("<p>x</p>"));
        assert_eq!(*surface.scroll_resets.lock().unwrap(), 1);
        assert_eq!(presenter.state().last_source_text(), Some("x"));
    }

    #[tokio::test]
    async fn test_show_failure_keeps_content_and_notifies() {
        let (presenter, _, surface) = setup(vec![]);
        presenter.show(Ok(ConvertedHtml::new("<p>x</p>")), "x");

        let outcome = presenter.show(Err(ConversionError::MissingPayload), "y");
        assert_eq!(outcome, Presentation::Failed(ConversionError::MissingPayload));
        assert_eq!(surface.displayed().as_deref(), Some("<p>x</p>"));
        assert_eq!(presenter.state().last_source_text(), Some("x"));
        assert_eq!(surface.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_preference_change_reconverts_last_source() {
        let (presenter, transport, surface) =
            setup(vec![ok("<p>medium</p>"), ok("<p>large</p>")]);
        let mut preferences = prefs();

        let first = presenter.convert_and_show("# Hi", &preferences).await;
        assert_eq!(first, Presentation::Displayed);

        preferences.apply(PreferenceUpdate::FontSize(FontSize::Large));
        let refresh = presenter.on_preference_changed(&preferences).await;

        assert_eq!(refresh, Presentation::Displayed);
        assert_eq!(surface.displayed().as_deref(), Some("<p>large</p>"));
        assert_eq!(transport.request_count(), 2);
        assert_eq!(transport.last_body()["markdown"], "# Hi");
        assert_eq!(transport.last_body()["fontSize"], "large");
        assert_eq!(presenter.state().last_source_text(), Some("# Hi"));
    }

    #[tokio::test]
    async fn test_failed_refresh_is_silent_and_keeps_html() {
        let (presenter, _, surface) = setup(vec![ok("<p>x</p>"), business_error()]);
        presenter.convert_and_show("x", &prefs()).await;

        let refresh = presenter.on_preference_changed(&prefs()).await;
        assert!(matches!(
            refresh,
            Presentation::Failed(ConversionError::Business { code: 5, .. })
        ));
        assert_eq!(surface.displayed().as_deref(), Some("<p>x</p>"));
        assert_eq!(
            presenter.current_html(),
            Some(ConvertedHtml::new("<p>x</p>"))
        );
        assert!(surface.errors().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_without_prior_conversion_is_noop() {
        let (presenter, transport, surface) = setup(vec![ok("<p>x</p>")]);
        let outcome = presenter.on_preference_changed(&prefs()).await;

        assert_eq!(outcome, Presentation::Skipped);
        assert_eq!(transport.request_count(), 0);
        assert!(surface.displayed().is_none());
    }

    #[tokio::test]
    async fn test_refresh_after_only_failures_is_noop() {
        let (presenter, transport, _) = setup(vec![business_error(), ok("<p>x</p>")]);
        presenter.convert_and_show("x", &prefs()).await;

        let outcome = presenter.on_preference_changed(&prefs()).await;
        assert_eq!(outcome, Presentation::Skipped);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_user_conversion_failure_is_reported() {
        let (presenter, transport, surface) = setup(vec![]);
        let outcome = presenter
            .convert_and_show("x", &Preferences::default())
            .await;

        assert_eq!(
            outcome,
            Presentation::Failed(ConversionError::MissingCredential)
        );
        assert_eq!(transport.request_count(), 0);
        assert_eq!(surface.errors().len(), 1);
        assert!(!presenter.state().is_populated());
    }

    #[tokio::test]
    async fn test_most_recent_conversion_wins() {
        let slow = (
            Duration::from_millis(500),
            Ok(TransportResponse::new(
                200,
                r#"{"code":0,"data":{"html":"<p>old</p>"}}"#,
            )),
        );
        let (presenter, _, surface) = setup(vec![slow, ok("<p>new</p>")]);
        let preferences = prefs();

        let (first, second) = tokio::join!(
            presenter.convert_and_show("old", &preferences),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                presenter.convert_and_show("new", &preferences).await
            }
        );

        assert_eq!(first, Presentation::Superseded);
        assert_eq!(second, Presentation::Displayed);
        assert_eq!(surface.displayed().as_deref(), Some("<p>new</p>"));
        assert_eq!(presenter.state().last_source_text(), Some("new"));
        assert!(surface.errors().is_empty());
    }

    fn slow(html: &str) -> Scripted {
        let (_, response) = ok(html);
        (Duration::from_millis(300), response)
    }

    #[tokio::test]
    async fn test_refresh_takes_over_pending_user_conversion() {
        let (presenter, transport, surface) = setup(vec![
            ok("<p>old</p>"),
            slow("<p>new-medium</p>"),
            ok("<p>new-large</p>"),
        ]);
        let preferences = prefs();
        presenter.convert_and_show("old", &preferences).await;

        let mut larger = preferences.clone();
        larger.apply(PreferenceUpdate::FontSize(FontSize::Large));
        let (user, refresh) = tokio::join!(
            presenter.convert_and_show("new", &preferences),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                presenter.on_preference_changed(&larger).await
            }
        );

        assert_eq!(user, Presentation::Superseded);
        assert_eq!(refresh, Presentation::Displayed);
        assert_eq!(surface.displayed().as_deref(), Some("<p>new-large</p>"));
        assert_eq!(presenter.state().last_source_text(), Some("new"));
        assert_eq!(transport.last_body()["markdown"], "new");
        assert_eq!(transport.last_body()["fontSize"], "large");
        assert!(surface.errors().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_reports_failure_of_pending_user_conversion() {
        let (presenter, _, surface) = setup(vec![
            ok("<p>old</p>"),
            slow("<p>new</p>"),
            business_error(),
        ]);
        let preferences = prefs();
        presenter.convert_and_show("old", &preferences).await;

        let (user, refresh) = tokio::join!(
            presenter.convert_and_show("new", &preferences),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                presenter.on_preference_changed(&preferences).await
            }
        );

        assert_eq!(user, Presentation::Superseded);
        assert!(matches!(
            refresh,
            Presentation::Failed(ConversionError::Business { code: 5, .. })
        ));
        assert_eq!(surface.displayed().as_deref(), Some("<p>old</p>"));
        assert_eq!(presenter.state().last_source_text(), Some("old"));
        assert_eq!(surface.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_copy_displayed_uses_text_fallback() {
        let (presenter, _, _) = setup(vec![ok("<p>x</p>")]);
        let clipboard = Arc::new(RecordingClipboard {
            written: Mutex::new(Vec::new()),
        });
        let copier = CopyContentUseCase::new(clipboard.clone());

        assert_eq!(
            presenter.copy_displayed(&copier).await,
            Err(CopyError::NothingToCopy)
        );

        presenter.convert_and_show("x", &prefs()).await;
        assert_eq!(
            presenter.copy_displayed(&copier).await,
            Ok(CopyOutcome::RichText)
        );
        assert_eq!(
            *clipboard.written.lock().unwrap(),
            vec![("<p>x</p>".to_string(), "text of <p>x</p>".to_string())]
        );
    }
}
