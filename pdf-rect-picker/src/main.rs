use clap::Parser;
use iced::widget::{
    button, column, container, horizontal_space, image as img, row, scrollable, stack, text,
    Canvas,
};
use iced::{keyboard, ContentFit, Element, Font, Length, Subscription, Task, Theme};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod geometry;
mod mapper;
mod overlay;
mod pdf_viewer;
mod renderer;
mod selection;
mod viewport;

use commands::Command;
use config::{Args, ZoomLimits};
use error::PickerError;
use geometry::{PagePoint, ScrollOffset, SelectionRect};
use overlay::{PointerEvent, SelectionOverlay, SCROLLBAR_WIDTH};
use pdf_viewer::{LoadedFile, PdfDocument, RenderedPage};
use renderer::PdfRenderer;
use selection::SelectionController;
use viewport::Viewport;

const APP_TITLE: &str = "PDF Rect Picker";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let limits = args.zoom_limits()?;
    let renderer = PdfRenderer::new()?;
    let startup_path = args.path;

    iced::application(PdfRectPicker::title, PdfRectPicker::update, PdfRectPicker::view)
        .subscription(PdfRectPicker::subscription)
        .theme(|_| Theme::Dark)
        .window_size((1200.0, 800.0))
        .run_with(move || PdfRectPicker::new(renderer, limits, startup_path))?;
    Ok(())
}

#[derive(Debug, Clone)]
enum Message {
    Command(Command),
    FilePicked(Option<PathBuf>),
    FileOpened(Result<LoadedFile, PickerError>),
    Scrolled(scrollable::Viewport),
    Pointer(PointerEvent),
}

struct OpenDocument {
    document: PdfDocument,
    viewport: Viewport,
    rendered: Option<RenderedPage>,
}

struct PdfRectPicker {
    renderer: PdfRenderer,
    limits: ZoomLimits,
    open: Option<OpenDocument>,
    selection: SelectionController,
    status: Option<String>,
}

fn page_scroll_id() -> scrollable::Id {
    scrollable::Id::new("page")
}

fn page_scrollbar() -> scrollable::Scrollbar {
    scrollable::Scrollbar::new()
        .width(SCROLLBAR_WIDTH)
        .scroller_width(SCROLLBAR_WIDTH)
}

/// Make `opened` the current document, starting on its first page with the
/// default zoom. On error neither `open` nor `selection` is touched.
fn install_document(
    open: &mut Option<OpenDocument>,
    selection: &mut SelectionController,
    limits: ZoomLimits,
    opened: error::Result<PdfDocument>,
) -> error::Result<()> {
    let document = opened?;
    let first_page = document.page(0)?;
    let viewport = Viewport::new(document.page_count(), limits);
    *open = Some(OpenDocument {
        document,
        viewport,
        rendered: None,
    });
    selection.on_page_changed(first_page);
    Ok(())
}

fn clipboard_text(selection: &SelectionController) -> error::Result<String> {
    selection
        .current_result()
        .map(|result| result.clipboard_text())
        .ok_or(PickerError::NoSelection)
}

async fn pick_pdf() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Open PDF")
        .add_filter("PDF Files", &["pdf"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

impl PdfRectPicker {
    fn new(
        renderer: PdfRenderer,
        limits: ZoomLimits,
        startup_path: Option<PathBuf>,
    ) -> (Self, Task<Message>) {
        let task = match startup_path {
            Some(path) => Task::done(Message::FilePicked(Some(path))),
            None => Task::none(),
        };
        (
            Self {
                renderer,
                limits,
                open: None,
                selection: SelectionController::new(),
                status: None,
            },
            task,
        )
    }

    fn title(&self) -> String {
        match &self.open {
            Some(open) => format!("{APP_TITLE} - {}", open.document.file_name()),
            None => APP_TITLE.to_string(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, modifiers| {
            commands::command_for_key(&key, modifiers).map(Message::Command)
        })
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Command(command) => return self.run_command(command),
            Message::FilePicked(Some(path)) => {
                return Task::perform(pdf_viewer::load(path), Message::FileOpened);
            }
            Message::FilePicked(None) => {}
            Message::FileOpened(Ok(file)) => return self.install(file),
            Message::FileOpened(Err(e)) => self.report(e),
            Message::Scrolled(scroll) => {
                if let Some(open) = &mut self.open {
                    let offset = scroll.absolute_offset();
                    open.viewport.set_scroll(ScrollOffset::new(offset.x, offset.y));
                }
            }
            Message::Pointer(event) => self.handle_pointer(event),
        }
        Task::none()
    }

    fn run_command(&mut self, command: Command) -> Task<Message> {
        tracing::debug!(?command, "command");
        match command {
            Command::Open => return Task::perform(pick_pdf(), Message::FilePicked),
            Command::PreviousPage | Command::NextPage => {
                let Some(open) = &self.open else {
                    return Task::none();
                };
                let viewport = &open.viewport;
                let target = match command {
                    Command::PreviousPage if viewport.has_previous_page() => {
                        viewport.current_page() - 1
                    }
                    Command::NextPage if viewport.has_next_page() => viewport.current_page() + 1,
                    _ => return Task::none(),
                };
                return self.go_to_page(target);
            }
            Command::ZoomIn => self.change_zoom(Viewport::zoom_in),
            Command::ZoomOut => self.change_zoom(Viewport::zoom_out),
            Command::ZoomReset => self.change_zoom(Viewport::reset_zoom),
            Command::CopySelection => match clipboard_text(&self.selection) {
                Ok(text) => {
                    self.status = Some(format!("Copied {text}"));
                    return iced::clipboard::write(text);
                }
                Err(e) => self.report(e),
            },
            Command::ClearSelection => self.selection.on_clear_requested(),
        }
        Task::none()
    }

    fn report(&mut self, error: PickerError) {
        match error {
            PickerError::NoDocument | PickerError::NoSelection => {
                tracing::debug!("{}", error);
            }
            _ => tracing::error!("{}", error),
        }
        self.status = Some(error.to_string());
    }

    /// Swap in a freshly read document. On failure the current one stays untouched.
    fn install(&mut self, file: LoadedFile) -> Task<Message> {
        let opened = PdfDocument::open(&self.renderer, file);
        if let Err(e) = install_document(&mut self.open, &mut self.selection, self.limits, opened) {
            self.report(e);
            return Task::none();
        }
        self.status = None;
        self.refresh_render();
        scrollable::scroll_to(page_scroll_id(), scrollable::AbsoluteOffset { x: 0.0, y: 0.0 })
    }

    fn go_to_page(&mut self, index: usize) -> Task<Message> {
        let Some(open) = &mut self.open else {
            self.report(PickerError::NoDocument);
            return Task::none();
        };
        let page = match open.document.page(index) {
            Ok(page) => page,
            Err(e) => {
                self.report(e);
                return Task::none();
            }
        };
        if !open.viewport.set_page(index) {
            return Task::none();
        }
        self.selection.on_page_changed(page);
        self.refresh_render();
        scrollable::scroll_to(page_scroll_id(), scrollable::AbsoluteOffset { x: 0.0, y: 0.0 })
    }

    fn change_zoom(&mut self, apply: fn(&mut Viewport)) {
        let Some(open) = &mut self.open else {
            return;
        };
        apply(&mut open.viewport);
        let view = open.viewport.transform();
        tracing::debug!(zoom = view.zoom.factor(), "zoom changed");
        if let Some(footprint) = self.selection.on_zoom_changed(&view) {
            tracing::debug!(?footprint, "selection re-projected");
        }
        self.refresh_render();
    }

    fn refresh_render(&mut self) {
        let Some(open) = &mut self.open else {
            return;
        };
        let page = open.viewport.current_page();
        match open
            .document
            .get_rendered_page(&self.renderer, page, open.viewport.zoom())
        {
            Ok(rendered) => open.rendered = Some(rendered),
            Err(e) => {
                open.rendered = None;
                self.report(e);
            }
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        let Some(open) = &self.open else {
            return;
        };
        let view = open.viewport.transform();
        match event {
            PointerEvent::Pressed(point) => {
                if let Err(e) = self.selection.on_pointer_down(point, &view) {
                    self.report(e);
                }
            }
            PointerEvent::Moved(point) => self.selection.on_pointer_move(point, &view),
            PointerEvent::Released(point) => {
                if self.selection.on_pointer_up(point, &view).is_some() {
                    self.status = None;
                }
            }
            PointerEvent::ReleasedOutside => {
                if self.selection.finish_drag().is_some() {
                    self.status = None;
                }
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let has_doc = self.open.is_some();
        let has_rect = self.selection.current_result().is_some();
        let (has_prev, has_next) = self
            .open
            .as_ref()
            .map(|open| (open.viewport.has_previous_page(), open.viewport.has_next_page()))
            .unwrap_or((false, false));

        let zoom_label = self
            .open
            .as_ref()
            .map(|open| format!("{}%", open.viewport.zoom().percent()))
            .unwrap_or_default();

        let toolbar = row![
            button("Open PDF").on_press(Message::Command(Command::Open)),
            button("Previous Page")
                .on_press_maybe(has_prev.then_some(Message::Command(Command::PreviousPage))),
            button("Next Page")
                .on_press_maybe(has_next.then_some(Message::Command(Command::NextPage))),
            button("Zoom In").on_press_maybe(has_doc.then_some(Message::Command(Command::ZoomIn))),
            button("Zoom Out")
                .on_press_maybe(has_doc.then_some(Message::Command(Command::ZoomOut))),
            button("Reset Zoom")
                .on_press_maybe(has_doc.then_some(Message::Command(Command::ZoomReset))),
            button("Copy Rect")
                .on_press_maybe(has_rect.then_some(Message::Command(Command::CopySelection))),
            text(zoom_label),
            horizontal_space(),
            text(self.page_label()),
        ]
        .spacing(10)
        .padding(10);

        let content = row![
            container(self.page_view())
                .width(Length::FillPortion(3))
                .height(Length::Fill),
            container(self.info_panel())
                .width(Length::FillPortion(1))
                .height(Length::Fill)
                .padding(10),
        ]
        .spacing(10);

        column![toolbar, content].padding(10).into()
    }

    fn page_label(&self) -> String {
        match &self.open {
            Some(open) => format!(
                "Page: {} / {}",
                open.viewport.current_page() + 1,
                open.document.page_count()
            ),
            None => "Page: -".to_string(),
        }
    }

    fn page_view(&self) -> Element<'_, Message> {
        let Some(open) = &self.open else {
            return container(
                column![
                    text(APP_TITLE).size(32),
                    text("Open a PDF document to get started").size(16),
                    button("Open PDF").on_press(Message::Command(Command::Open)),
                ]
                .spacing(20)
                .align_x(iced::Alignment::Center),
            )
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
        };
        let Some(rendered) = &open.rendered else {
            return container(text("Page could not be rendered"))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into();
        };

        let page = scrollable(
            img(rendered.handle.clone())
                .width(Length::Fixed(rendered.width as f32))
                .height(Length::Fixed(rendered.height as f32))
                .content_fit(ContentFit::Fill),
        )
        .id(page_scroll_id())
        .direction(scrollable::Direction::Both {
            vertical: page_scrollbar(),
            horizontal: page_scrollbar(),
        })
        .on_scroll(Message::Scrolled)
        .width(Length::Fill)
        .height(Length::Fill);

        let view = open.viewport.transform();
        let page_bounds = self
            .selection
            .page()
            .map(|page| page.size.bounds())
            .unwrap_or_else(|| SelectionRect::degenerate(PagePoint::default()));
        let page_area = mapper::page_rect_to_viewport(&page_bounds, view.zoom, view.scroll);
        let overlay = SelectionOverlay::new(
            self.selection.projected(&view),
            page_area,
            self.selection.is_dragging(),
        );
        let overlay: Element<'_, PointerEvent> = Canvas::new(overlay)
            .width(Length::Fill)
            .height(Length::Fill)
            .into();

        stack![page, overlay.map(Message::Pointer)].into()
    }

    fn info_panel(&self) -> Element<'_, Message> {
        let result = self.selection.current_result();
        let rect_label = result
            .map(|r| r.rect_label())
            .unwrap_or_else(|| "Rect: -".to_string());
        let size_label = result
            .map(|r| r.size_label())
            .unwrap_or_else(|| "Size: -".to_string());
        let json = result.map(|r| r.to_json()).unwrap_or_default();

        let mut panel = column![
            text("Info").size(20),
            text(rect_label),
            text(size_label),
            text(self.page_label()),
            text("JSON:"),
            scrollable(text(json).font(Font::MONOSPACE)).height(Length::Fill),
        ]
        .spacing(8);

        if let Some(status) = &self.status {
            panel = panel.push(text(status.clone()));
        }
        panel.into()
    }
}
