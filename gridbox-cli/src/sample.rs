//! Sample dialog used by the `gridbox` command.

use gridbox::{Cell, Container, LayoutError, WidgetKind};

fn widget(kind: WidgetKind, id: &str, width: &str, height: &str) -> Result<Cell, LayoutError> {
    Cell::leaf(kind).with_id(id).sized(width, height)
}

/// Settings dialog: title, a form of labelled inputs, and a button row.
///
/// Sizes lean on `screen_width`/`screen_height` and the `vga`/`svga` flags
/// so the output changes with `--screen`.
pub fn settings_dialog() -> Result<Container, LayoutError> {
    let form = Container::builder()
        .row(
            0,
            vec![
                widget(WidgetKind::Label, "name_label", "100", "auto")?,
                widget(WidgetKind::TextBox, "name", "screen_width / 4", "24")?,
            ],
        )
        .row(
            0,
            vec![
                widget(WidgetKind::Label, "volume_label", "100", "auto")?,
                widget(WidgetKind::Slider, "volume", "auto", "24")?,
            ],
        )
        .row(
            1,
            vec![
                widget(WidgetKind::Label, "theme_label", "100", "auto")?,
                widget(WidgetKind::Listbox, "theme", "auto", "if(svga, screen_height / 6, 60)")?,
            ],
        )
        .column_weights(&[0, 1])
        .build()?;

    let buttons = Container::builder()
        .row(
            0,
            vec![
                Cell::default(),
                widget(WidgetKind::Button, "ok", "80", "if(vga, 28, 22)")?,
                widget(WidgetKind::Button, "cancel", "80", "if(vga, 28, 22)")?,
            ],
        )
        .column_weights(&[1, 0, 0])
        .build()?;

    Container::builder()
        .row(0, vec![widget(WidgetKind::Label, "title", "auto", "max(24, screen_height / 20)")?])
        .row(1, vec![Cell::grid(form).with_id("form")])
        .row(0, vec![Cell::grid(buttons).with_id("buttons")])
        .build()
}
