use library_catalog::catalog_store::{Book, BookStatus};
use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    clap::builder::Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const CYAN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 255,
    };
    pub const PURPLE: Color = Color::Rgb {
        r: 180,
        g: 100,
        b: 255,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 136,
    };
    pub const ORANGE: Color = Color::Rgb {
        r: 255,
        g: 165,
        b: 0,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Box Drawing Characters
// ═══════════════════════════════════════════════════════════════════════════════

pub mod box_chars {
    pub const SINGLE_HORIZONTAL: &str = "─";
    pub const SINGLE_VERTICAL: &str = "│";
    pub const CROSS: &str = "┼";

    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Banner
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_banner() {
    let banner = r#"
    ██╗     ██╗██████╗ ██████╗  █████╗ ██████╗ ██╗   ██╗
    ██║     ██║██╔══██╗██╔══██╗██╔══██╗██╔══██╗╚██╗ ██╔╝
    ██║     ██║██████╔╝██████╔╝███████║██████╔╝ ╚████╔╝
    ██║     ██║██╔══██╗██╔══██╗██╔══██║██╔══██╗  ╚██╔╝
    ███████╗██║██████╔╝██║  ██║██║  ██║██║  ██║   ██║
    ╚══════╝╚═╝╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝   ╚═╝
"#;

    let gradient_colors = [
        colors::CYAN,
        colors::CYAN,
        colors::CYAN,
        colors::PURPLE,
        colors::PURPLE,
        colors::PURPLE,
        colors::PURPLE,
    ];

    for (i, line) in banner.lines().enumerate() {
        let color = gradient_colors.get(i).unwrap_or(&colors::CYAN);
        println!("{}", line.with(*color).bold());
    }

    let subtitle = "  ═════════════════  CATALOG MANAGEMENT CLI  ═════════════════";
    println!("{}", subtitle.with(colors::DIM));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.to_string().with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    println!(
        " {} {}",
        box_chars::CROSS_MARK.to_string().with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::ORANGE).bold(),
        message.with(colors::ORANGE)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Book Display
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(colors::PURPLE),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        box_chars::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM)
    );
}

pub fn print_book_details(book: &Book) {
    println!("{}", "Book Found:".with(colors::CYAN).bold());
    print_key_value("ID", &book.id);
    print_key_value("Title", &book.title);
    print_key_value("Author", &book.author);
    print_key_value("Genre", book.genre.as_deref().unwrap_or(""));
    print_key_value("Status", book.status.label());
}

const TABLE_HEADERS: [&str; 5] = ["Book ID", "Title", "Author", "Genre", "Status"];

fn book_cells(book: &Book) -> [&str; 5] {
    [
        book.id.as_str(),
        book.title.as_str(),
        book.author.as_str(),
        book.genre.as_deref().unwrap_or(""),
        book.status.label(),
    ]
}

/// Display width of each column, wide enough for the header and every cell.
fn column_widths(books: &[Book]) -> [usize; 5] {
    let mut widths = TABLE_HEADERS.map(|header| header.width());
    for book in books {
        for (width, cell) in widths.iter_mut().zip(book_cells(book)) {
            *width = (*width).max(cell.width());
        }
    }
    widths
}

fn pad(cell: &str, width: usize) -> String {
    format!("{}{}", cell, " ".repeat(width.saturating_sub(cell.width())))
}

fn format_row(cells: [&str; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!(" {} ", pad(cell, *width)))
        .collect::<Vec<_>>()
        .join(box_chars::SINGLE_VERTICAL)
}

fn format_separator(widths: &[usize; 5]) -> String {
    widths
        .iter()
        .map(|width| box_chars::SINGLE_HORIZONTAL.repeat(width + 2))
        .collect::<Vec<_>>()
        .join(box_chars::CROSS)
}

pub fn print_books_table(books: &[Book]) {
    if books.is_empty() {
        print_empty_list("The catalog is empty.");
        return;
    }

    let widths = column_widths(books);
    println!("{}", format_row(TABLE_HEADERS, &widths).with(colors::CYAN).bold());
    println!("{}", format_separator(&widths).with(colors::DIM));
    for book in books {
        let row = format_row(book_cells(book), &widths);
        match book.status {
            BookStatus::Available => println!("{}", row.with(colors::WHITE)),
            BookStatus::CheckedOut => println!("{}", row.with(colors::DIM)),
        }
    }
    println!(
        "{}",
        format!("{} book(s)", books.len()).with(colors::DIM)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books() -> Vec<Book> {
        vec![
            Book::new("B1", "Dune", "Frank Herbert", Some("SciFi"), BookStatus::Available),
            Book::new("B22", "Emma", "Jane Austen", None, BookStatus::CheckedOut),
        ]
    }

    #[test]
    fn test_column_widths_fit_headers_and_cells() {
        assert_eq!(column_widths(&books()), [7, 5, 13, 5, 11]);
    }

    #[test]
    fn test_format_row_pads_cells() {
        let widths = column_widths(&books());
        let row = format_row(book_cells(&books()[0]), &widths);
        assert_eq!(
            row,
            " B1      │ Dune  │ Frank Herbert │ SciFi │ Available   "
        );
    }

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("日本", 6), "日本  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }
}
