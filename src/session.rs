use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::dimensions;
use crate::loader::{self, ImageSource, LoadOutcome, LoadedImage};
use crate::notify::{Notice, Notifier, Severity};
use crate::presets;
use crate::resizer::{self, ResizeError, ResizeResult};

/// Single owner of the tool's mutable state. The UI layer forwards input
/// events here and renders whatever this struct exposes; nothing else
/// touches the active image or the latest result.
pub struct Session {
    current: Option<LoadedImage>,
    result: Option<ResizeResult>,
    pub width_text: String,
    pub height_text: String,
    preset_id: Option<String>,
    notifier: Notifier,
    loads_in_flight: usize,
    image_revision: u64,
    load_sender: Sender<LoadOutcome>,
    load_receiver: Receiver<LoadOutcome>,
}

impl Session {
    pub fn new() -> Self {
        let (load_sender, load_receiver) = channel();
        let mut notifier = Notifier::new();
        notifier.notify("Upload or drag an image to get started!", Severity::Info);
        Self {
            current: None,
            result: None,
            width_text: String::new(),
            height_text: String::new(),
            preset_id: None,
            notifier,
            loads_in_flight: 0,
            image_revision: 0,
            load_sender,
            load_receiver,
        }
    }

    /// Start loading `source` on a worker thread. The outcome arrives via
    /// [`Session::poll_loads`].
    pub fn select_file(&mut self, source: ImageSource) {
        log::info!("loading {}", source.display_name());
        self.loads_in_flight += 1;
        loader::spawn_load(source, self.load_sender.clone());
    }

    /// Drain finished loads. All workers share one channel, so when loads
    /// overlap the completion drained last is the one left active.
    pub fn poll_loads(&mut self) {
        while let Ok(outcome) = self.load_receiver.try_recv() {
            self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
            self.finish_load(outcome);
        }
    }

    fn finish_load(&mut self, outcome: LoadOutcome) {
        match outcome {
            Ok(image) => {
                self.width_text = image.width().to_string();
                self.height_text = image.height().to_string();
                self.preset_id = None;
                self.result = None;
                self.image_revision += 1;
                self.current = Some(image);
                self.notifier
                    .notify("Image loaded successfully!", Severity::Success);
            }
            // A failed load keeps the previously loaded image, its name
            // included, and only reports the error.
            Err(err) => self.notifier.notify(err.to_string(), Severity::Error),
        }
    }

    /// Apply a preset selection, or revert to the intrinsic size when the
    /// selection is cleared (or names an unknown id) while an image is
    /// active. With no image and no preset the fields stay as they are.
    pub fn set_preset(&mut self, id: Option<String>) {
        let selected = id.as_deref().unwrap_or("");
        let entry = presets::lookup(selected);
        if let Some(size) = dimensions::resolve_from_preset(selected, self.current.as_ref()) {
            self.width_text = size.width.to_string();
            self.height_text = size.height.to_string();
            if let Some(entry) = entry {
                self.notifier
                    .notify(format!("Preset \"{}\" applied.", entry.label), Severity::Info);
            }
        }
        self.preset_id = entry.map(|entry| entry.id.to_string());
    }

    /// Resolve the manual fields and produce a new resize result. Every
    /// failure path surfaces exactly one error notice.
    pub fn trigger_resize(&mut self) {
        let Some(image) = self.current.as_ref() else {
            self.notifier
                .notify(ResizeError::NoImageLoaded.to_string(), Severity::Error);
            return;
        };

        let target = match dimensions::resolve_from_manual_input(&self.width_text, &self.height_text)
        {
            Ok(target) => target,
            Err(err) => {
                self.notifier.notify(err.to_string(), Severity::Error);
                return;
            }
        };

        match resizer::resize(image, target) {
            Ok(result) => {
                self.notifier.notify(
                    format!("Image resized to {}x{}!", result.width, result.height),
                    Severity::Success,
                );
                self.result = Some(result);
            }
            Err(err) => self.notifier.notify(err.to_string(), Severity::Error),
        }
    }

    /// Write the latest result to `path`.
    pub fn save_result(&mut self, path: &Path) {
        let Some(result) = self.result.as_ref() else {
            return;
        };
        match std::fs::write(path, &result.png) {
            Ok(()) => {
                log::info!("saved {}", path.display());
                self.notifier
                    .notify(format!("Saved {}.", path.display()), Severity::Success);
            }
            Err(err) => self.notifier.notify(
                format!("Could not save {}: {err}", path.display()),
                Severity::Error,
            ),
        }
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.current.as_ref()
    }

    pub fn result(&self) -> Option<&ResizeResult> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notifier.visible()
    }

    pub fn loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    pub fn preset_id(&self) -> Option<&str> {
        self.preset_id.as_deref()
    }

    /// Bumped on every successful load; lets the UI know when to rebuild
    /// its preview texture.
    pub fn image_revision(&self) -> u64 {
        self.image_revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadError;
    use image::DynamicImage;

    fn test_image(name: &str, width: u32, height: u32) -> LoadedImage {
        LoadedImage {
            image: DynamicImage::new_rgba8(width, height),
            name: name.into(),
        }
    }

    /// Deliver a load outcome as if a worker thread had finished.
    fn deliver(session: &mut Session, outcome: LoadOutcome) {
        session.load_sender.send(outcome).unwrap();
        session.poll_loads();
    }

    #[test]
    fn starts_with_a_hint_and_no_image() {
        let session = Session::new();
        assert!(session.image().is_none());
        assert!(session.result().is_none());
        let notice = session.notice().unwrap();
        assert_eq!(notice.severity, Severity::Info);
    }

    #[test]
    fn successful_load_prefills_fields_and_resets_selection() {
        let mut session = Session::new();
        deliver(&mut session, Ok(test_image("a.png", 640, 480)));

        assert_eq!(session.image().unwrap().name, "a.png");
        assert_eq!(session.width_text, "640");
        assert_eq!(session.height_text, "480");
        assert!(session.preset_id().is_none());
        assert_eq!(session.notice().unwrap().severity, Severity::Success);
        assert_eq!(session.image_revision(), 1);
    }

    #[test]
    fn failed_load_reports_once_and_keeps_prior_state() {
        let mut session = Session::new();
        deliver(&mut session, Ok(test_image("keep.png", 300, 200)));

        deliver(
            &mut session,
            Err(LoadError::InvalidInputKind("memo.txt".into())),
        );

        let kept = session.image().unwrap();
        assert_eq!(kept.name, "keep.png");
        assert_eq!((kept.width(), kept.height()), (300, 200));
        assert_eq!(session.notice().unwrap().severity, Severity::Error);
    }

    #[test]
    fn failed_load_without_prior_image_produces_no_image() {
        let mut session = Session::new();
        deliver(
            &mut session,
            Err(LoadError::InvalidInputKind("memo.txt".into())),
        );

        assert!(session.image().is_none());
        assert_eq!(session.notice().unwrap().severity, Severity::Error);
    }

    #[test]
    fn last_completing_load_wins() {
        let mut session = Session::new();
        session.load_sender.send(Ok(test_image("first.png", 10, 10))).unwrap();
        session.load_sender.send(Ok(test_image("second.png", 20, 20))).unwrap();
        session.poll_loads();

        assert_eq!(session.image().unwrap().name, "second.png");
        assert_eq!(session.width_text, "20");
    }

    #[test]
    fn preset_selection_overwrites_the_fields() {
        let mut session = Session::new();
        deliver(&mut session, Ok(test_image("a.png", 640, 480)));

        session.set_preset(Some("fb_cover".into()));

        assert_eq!(session.width_text, "820");
        assert_eq!(session.height_text, "312");
        assert_eq!(session.preset_id(), Some("fb_cover"));
        assert_eq!(session.notice().unwrap().severity, Severity::Info);
    }

    #[test]
    fn clearing_the_preset_reverts_to_intrinsic_size() {
        let mut session = Session::new();
        deliver(&mut session, Ok(test_image("a.png", 640, 480)));
        session.set_preset(Some("ig_story".into()));

        session.set_preset(None);

        assert_eq!(session.width_text, "640");
        assert_eq!(session.height_text, "480");
        assert!(session.preset_id().is_none());
    }

    #[test]
    fn preset_without_an_image_leaves_fields_untouched() {
        let mut session = Session::new();
        session.width_text = "123".into();
        session.height_text = "456".into();

        session.set_preset(None);

        assert_eq!(session.width_text, "123");
        assert_eq!(session.height_text, "456");
    }

    #[test]
    fn resize_without_an_image_is_a_reported_precondition_failure() {
        let mut session = Session::new();
        session.width_text = "800".into();
        session.height_text = "600".into();

        session.trigger_resize();

        assert!(session.result().is_none());
        assert_eq!(session.notice().unwrap().severity, Severity::Error);
    }

    #[test]
    fn resize_with_bad_manual_input_stores_no_result() {
        let mut session = Session::new();
        deliver(&mut session, Ok(test_image("a.png", 100, 100)));

        session.width_text = "abc".into();
        session.trigger_resize();
        assert!(session.result().is_none());
        assert_eq!(session.notice().unwrap().severity, Severity::Error);

        session.width_text = "-5".into();
        session.trigger_resize();
        assert!(session.result().is_none());
        assert_eq!(session.notice().unwrap().severity, Severity::Error);
    }

    #[test]
    fn resize_produces_a_result_at_the_resolved_size() {
        let mut session = Session::new();
        deliver(&mut session, Ok(test_image("a.png", 100, 50)));

        session.width_text = "200".into();
        session.height_text = "200".into();
        session.trigger_resize();

        let result = session.result().unwrap();
        assert_eq!((result.width, result.height), (200, 200));
        assert_eq!(result.file_name, "resized_200x200.png");
        assert_eq!(session.notice().unwrap().severity, Severity::Success);
    }

    #[test]
    fn a_new_result_supersedes_the_previous_one() {
        let mut session = Session::new();
        deliver(&mut session, Ok(test_image("a.png", 100, 100)));

        session.width_text = "50".into();
        session.height_text = "50".into();
        session.trigger_resize();

        session.width_text = "80".into();
        session.height_text = "40".into();
        session.trigger_resize();

        let result = session.result().unwrap();
        assert_eq!((result.width, result.height), (80, 40));
    }

    #[test]
    fn loading_a_new_image_discards_the_previous_result() {
        let mut session = Session::new();
        deliver(&mut session, Ok(test_image("a.png", 100, 100)));
        session.trigger_resize();
        assert!(session.result().is_some());

        deliver(&mut session, Ok(test_image("b.png", 64, 64)));
        assert!(session.result().is_none());
        assert_eq!(session.image_revision(), 2);
    }

    #[test]
    fn save_result_writes_the_png_to_disk() {
        let mut session = Session::new();
        deliver(&mut session, Ok(test_image("a.png", 32, 32)));
        session.trigger_resize();

        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        session.save_result(&path);

        let written = std::fs::read(&path).unwrap();
        let decoded = image::load_from_memory(&written).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
        assert_eq!(session.notice().unwrap().severity, Severity::Success);
    }

    #[test]
    fn select_file_round_trips_through_the_worker() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.png");
        image::RgbImage::from_fn(48, 24, |_, _| image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let mut session = Session::new();
        session.select_file(ImageSource::Path(path));
        assert!(session.loading());

        // The worker finishes on its own schedule; poll until it lands.
        for _ in 0..200 {
            session.poll_loads();
            if session.image().is_some() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        let loaded = session.image().expect("load did not finish in time");
        assert_eq!((loaded.width(), loaded.height()), (48, 24));
        assert!(!session.loading());
    }
}
