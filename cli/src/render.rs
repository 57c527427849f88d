use uncover_core::{BoardView, TileView};

fn glyph(tile: TileView) -> char {
    match tile {
        TileView::Hidden => '#',
        TileView::Flagged => 'F',
        TileView::Opened(0) => '.',
        TileView::Opened(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        TileView::Exploded => 'X',
        TileView::Mine => '*',
        TileView::WrongFlag => '!',
    }
}

fn digits(n: usize) -> usize {
    n.checked_ilog10().unwrap_or(0) as usize + 1
}

/// Draws the board as a text grid with row and column indices.
pub fn render(view: &BoardView) -> String {
    let (rows, cols) = view.size;
    let row_width = digits(usize::from(rows).saturating_sub(1));
    let col_width = digits(usize::from(cols).saturating_sub(1));
    let mut out = String::new();

    out.push_str(&" ".repeat(row_width));
    for col in 0..cols {
        out.push_str(&format!(" {col:>col_width$}"));
    }
    out.push('\n');

    for row in 0..rows {
        out.push_str(&format!("{row:>row_width$}"));
        for col in 0..cols {
            let tile = glyph(view.tile_at((row, col)));
            out.push_str(&format!(" {tile:>col_width$}"));
        }
        out.push('\n');
    }

    out
}
