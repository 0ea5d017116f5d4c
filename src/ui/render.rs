use crate::screens::Screen;
use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use crate::ui::views::render_screen;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let view = app.view();

    frame.render_widget(Header::new().widget(view.stack()), header);
    frame.render_widget(Clear, body);

    let active = &view.stack().active.instance;
    match view.transition() {
        Some(transition) => {
            let (incoming, outgoing) = transition.offsets(body.width);
            render_shifted(transition.outgoing(), body, outgoing, frame.buffer_mut());
            render_shifted(active, body, incoming, frame.buffer_mut());
        }
        None => {
            if let Some(cursor) = render_screen(active, body, frame.buffer_mut()) {
                frame.set_cursor_position(cursor);
            }
        }
    }

    frame.render_widget(Footer::new().widget(active, footer), footer);
}

/// Render `screen` as if it were `dx` columns to the right of `area`,
/// clipped to `area`.
fn render_shifted(screen: &Screen, area: Rect, dx: i32, buf: &mut Buffer) {
    if dx == 0 {
        render_screen(screen, area, buf);
        return;
    }
    let width = i32::from(area.width);
    if dx.abs() >= width {
        return;
    }

    let local = Rect::new(0, 0, area.width, area.height);
    let mut scratch = Buffer::empty(local);
    render_screen(screen, local, &mut scratch);

    for y in 0..area.height {
        for x in 0..area.width {
            let target = i32::from(x) + dx;
            if !(0..width).contains(&target) {
                continue;
            }
            let Some(src) = scratch.cell((x, y)) else {
                continue;
            };
            if let Some(dst) = buf.cell_mut((area.x + target as u16, area.y + y)) {
                *dst = src.clone();
            }
        }
    }
}
