use crate::config::{BORDER_TOP, JACK, Layout};
use crate::screen::Canvas;
use crate::session::{Phase, Session};

const TEXT_COLUMN: u16 = 8;

fn draw_rule(canvas: &mut impl Canvas, row: u16, width: u16, glyph: char) {
    for column in 0..width {
        canvas.put(column, row, glyph);
    }
}

fn draw_box(canvas: &mut impl Canvas, layout: Layout) {
    let (w, h) = (layout.screen_width(), layout.height);
    draw_rule(canvas, 0, w, '-');
    draw_rule(canvas, h - 1, w, '-');
    for row in 0..h {
        canvas.put(0, row, '|');
        canvas.put(w - 1, row, '|');
    }
    for (column, row) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
        canvas.put(column, row, '+');
    }
}

// ── Frames ──────────────────────────────────────────────────────────────────

/// Full redraw of a running game: wavy edges, meters, road and Jack on top.
pub fn draw_frame(canvas: &mut impl Canvas, layout: Layout, session: &Session) {
    canvas.clear();
    draw_rule(canvas, 0, layout.screen_width(), BORDER_TOP);
    draw_rule(canvas, layout.height - 1, layout.screen_width(), BORDER_TOP);

    canvas.text(1, 1, &format!("Meters: {}", session.score()));
    let goal = format!("Goal: {}", session.score_for_win());
    let goal_column = layout.screen_width().saturating_sub(goal.len() as u16 + 1);
    canvas.text(1, goal_column, &goal);

    for tile in session.track().tiles() {
        canvas.put(tile.column, tile.row, tile.kind.glyph());
    }
    let jack = session.player().position();
    canvas.put(jack.column, jack.row, JACK);
}

pub fn draw_instructions(canvas: &mut impl Canvas, layout: Layout) {
    let mid = layout.height / 2;
    canvas.clear();
    draw_box(canvas, layout);
    canvas.text(mid - 3, TEXT_COLUMN, "Jump and Run, Jack!");
    canvas.text(mid - 1, TEXT_COLUMN, "Your Goal: Finish the Track");
    canvas.text(mid, TEXT_COLUMN, "Controls: 'a', 'd', 'w'/'space'");
    canvas.text(mid + 3, TEXT_COLUMN, "Press E(asy), N(ormal), H(ard) or Q(uit).");
}

pub fn draw_end(canvas: &mut impl Canvas, layout: Layout, phase: Phase) {
    let mid = layout.height / 2;
    canvas.clear();
    draw_box(canvas, layout);
    canvas.text(mid - 1, TEXT_COLUMN, phase.message());
    canvas.text(mid + 1, TEXT_COLUMN, "Press any key to exit.");
}
