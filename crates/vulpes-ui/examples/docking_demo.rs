//! Docking Demo - headless file-browser layout
//!
//! Builds a toolbar, sidebar, status bar and content area with docking,
//! then scripts a short session against it:
//! - Hovering and clicking the sidebar entries
//! - Dragging a file from the sidebar into the content area
//! - Firing a toolbar accelerator from the keyboard
//!
//! Nothing is drawn to a window; the frame's draw calls are recorded and
//! summarized. Run with `RUST_LOG=vulpes_ui=debug` to watch the canvas work.

use std::{cell::RefCell, rc::Rc};

use tracing::info;
use vulpes_core::{
    logging,
    profiling::{ProfilingBackend, init_profiling},
};
use vulpes_ui::{
    BasicSkin, Canvas, ControlId, Dock, IVec2, InputEvent, Margin, MouseButton, Package, Padding, Panel, UiEvent,
    UiResult, testing::RecordingRenderer,
};

struct Layout {
    sidebar: ControlId,
    files: Vec<ControlId>,
    content: ControlId,
}

fn build(canvas: &mut Canvas) -> UiResult<Layout> {
    let root = canvas.root();

    let toolbar = canvas.add_control(root, Panel::drawn())?;
    canvas.set_name(toolbar, "toolbar");
    canvas.set_dock(toolbar, Dock::TOP);
    canvas.set_size(toolbar, 0, 32);
    canvas.add_accelerator(toolbar, "r", "refresh");

    let status = canvas.add_control(root, Panel::drawn())?;
    canvas.set_name(status, "status");
    canvas.set_dock(status, Dock::BOTTOM);
    canvas.set_size(status, 0, 20);
    canvas.set_tooltip(status, Some("Ready".to_owned()));

    let sidebar = canvas.add_control(root, Panel::drawn())?;
    canvas.set_name(sidebar, "sidebar");
    canvas.set_dock(sidebar, Dock::LEFT);
    canvas.set_size(sidebar, 180, 0);
    canvas.set_margin(sidebar, Margin::new(0, 4, 4, 4));
    canvas.set_padding(sidebar, Padding::new(4, 4, 4, 4));

    let mut files = Vec::new();
    for name in ["notes.txt", "photo.png", "report.pdf"] {
        let file = canvas.add_control(sidebar, Panel::drawn())?;
        canvas.set_name(file, name);
        canvas.set_dock(file, Dock::TOP);
        canvas.set_size(file, 0, 24);
        canvas.set_margin(file, Margin::new(0, 0, 0, 2));
        canvas.set_keyboard_input(file, true);
        canvas.set_tabable(file, true);
        canvas.set_drag_package(file, Package::new("file"));
        files.push(file);
    }

    let content = canvas.add_control(root, Panel::drawn())?;
    canvas.set_name(content, "content");
    canvas.set_dock(content, Dock::FILL);
    canvas.accept_package(content, "file");

    Ok(Layout {
        sidebar,
        files,
        content,
    })
}

fn main() -> UiResult<()> {
    logging::init();
    init_profiling(ProfilingBackend::Off);

    let renderer = Rc::new(RefCell::new(RecordingRenderer::default()));
    let mut canvas = Canvas::new(BasicSkin::new(renderer.clone()).shared());
    canvas.resize(800, 600);

    let layout = build(&mut canvas)?;
    canvas.frame();

    for id in [layout.sidebar, layout.content]
        .into_iter()
        .chain(layout.files.iter().copied())
    {
        if let Some(control) = canvas.control(id) {
            info!("{:<12} {:?}", control.name(), control.bounds());
        }
    }

    let mouse_to = |canvas: &mut Canvas, x: i32, y: i32| {
        let delta = IVec2::new(x, y) - canvas.mouse_position();
        canvas.handle_input(InputEvent::MouseMoved {
            position: IVec2::new(x, y),
            delta,
        });
    };
    let button = |canvas: &mut Canvas, pressed: bool| {
        canvas.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        });
    };

    // Click the first file, then drag the second one into the content area.
    mouse_to(&mut canvas, 40, 50);
    button(&mut canvas, true);
    button(&mut canvas, false);

    mouse_to(&mut canvas, 40, 76);
    button(&mut canvas, true);
    mouse_to(&mut canvas, 120, 76);
    mouse_to(&mut canvas, 400, 300);
    info!("cursor while dragging: {:?}", canvas.cursor());
    canvas.frame();
    button(&mut canvas, false);

    canvas.handle_input(InputEvent::Char('r'));
    renderer.borrow_mut().take_calls();
    canvas.frame();

    for event in canvas.drain_events() {
        match event {
            UiEvent::Dropped { source, target, success } => {
                info!("dropped {source} on {target:?}: {success}");
            }
            UiEvent::Accelerator { control, action } => {
                info!("accelerator {action} fired on {control}");
            }
            other => info!("{other:?}"),
        }
    }

    info!(
        "content now holds {} control(s); last frame recorded {} draw calls",
        canvas.children(layout.content).len(),
        renderer.borrow().calls().len()
    );
    info!("{:?}", canvas.metrics());
    Ok(())
}
