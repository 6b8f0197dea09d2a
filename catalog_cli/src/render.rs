use std::io::{self, Write};

use catalog_core::{
    rows::{OwnerStyle, ProductRow},
    view::ViewState,
    CatalogPage,
};
use serde::Serialize;

const HEADERS: [&str; 4] = ["ID", "Product", "Category", "User"];
const NO_MATCHES: &str = "No products matching selected criteria";

#[derive(Debug, Default, Copy, Clone)]
pub struct RenderOptions {
    /// Highlight owner names with ANSI colors.
    pub color: bool,
}

/// Writes the filter panel followed by the product table.
pub fn render_page(
    out: &mut impl Write,
    page: &CatalogPage,
    options: RenderOptions,
) -> io::Result<()> {
    writeln!(out, "Product Categories")?;
    writeln!(out)?;
    render_filters(out, page)?;
    writeln!(out)?;
    render_table(out, page.rows(), options)?;
    if page.no_matches() {
        writeln!(out, "{NO_MATCHES}")?;
    }
    Ok(())
}

fn render_filters(out: &mut impl Write, page: &CatalogPage) -> io::Result<()> {
    let state = page.state();
    let catalog = page.catalog();

    writeln!(out, "Filters")?;

    let mut tabs = vec![tab("All", state.all_users_tab_active())];
    tabs.extend(catalog.users().iter().map(|user| tab(&user.name, false)));
    writeln!(out, "  Users:      {}", tabs.join("  "))?;

    let clear = if state.clear_button_visible() { "  (x)" } else { "" };
    let search = format!("  Search:     {}{clear}", state.search);
    writeln!(out, "{}", search.trim_end())?;

    // category buttons and the reset button are drawn but not wired to anything
    let mut buttons = vec![tab("All", true)];
    buttons.extend(catalog.categories().iter().map(|category| category.title().to_string()));
    writeln!(out, "  Categories: {}", buttons.join("  "))?;
    writeln!(out, "  [Reset all filters]")?;
    Ok(())
}

fn tab(label: &str, active: bool) -> String {
    if active {
        format!("[{label}]")
    } else {
        label.to_string()
    }
}

fn render_table(
    out: &mut impl Write,
    rows: &[ProductRow],
    options: RenderOptions,
) -> io::Result<()> {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.product_id.to_string(),
                row.product_name.clone(),
                row.category.as_ref().map(ToString::to_string).unwrap_or_default(),
                row.owner.as_ref().map(|owner| owner.name.clone()).unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<_> = HEADERS.iter().map(|header| header.to_string()).collect();
    writeln!(out, "{}", join_padded(&header, &widths).trim_end())?;
    writeln!(out, "{}", widths.map(|width| "-".repeat(width)).join("  "))?;

    for (row, cells) in rows.iter().zip(&cells) {
        let mut line = join_padded(&cells[..3], &widths[..3]);
        line.push_str("  ");
        line.push_str(&owner_cell(&cells[3], row.owner_style(), options));
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell}{}", " ".repeat(width - cell.chars().count())))
        .collect::<Vec<_>>()
        .join("  ")
}

fn owner_cell(name: &str, style: OwnerStyle, options: RenderOptions) -> String {
    if !options.color || name.is_empty() {
        return name.to_string();
    }
    let code = match style {
        OwnerStyle::Danger => "31",
        OwnerStyle::Link => "34",
    };
    format!("\x1b[{code}m{name}\x1b[0m")
}

#[derive(Serialize)]
struct PageSnapshot<'a> {
    view: &'a ViewState,
    rows: &'a [ProductRow],
    #[serde(rename = "noMatches")]
    no_matches: bool,
}

pub fn render_json(out: &mut impl Write, page: &CatalogPage) -> serde_json::Result<()> {
    let snapshot =
        PageSnapshot { view: page.state(), rows: page.rows(), no_matches: page.no_matches() };
    serde_json::to_writer_pretty(&mut *out, &snapshot)?;
    writeln!(out).map_err(serde_json::Error::io)
}
