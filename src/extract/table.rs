//! Table extraction.

use scraper::ElementRef;

use super::html::{child_elements, descendants_excluding, is_list, links_excluding, outermost, tag, text_excluding, text_of};
use super::LinkResolver;
use crate::model::{CellContent, CellList, ListKind, TableData};

/// Extract tables from an element.
///
/// If `root` is itself a `<table>` only that table is extracted; otherwise
/// every table inside `root` is. Tables with neither headers nor rows are
/// dropped.
pub fn extract_tables(root: ElementRef<'_>, resolver: &LinkResolver) -> Vec<TableData> {
    if tag(&root) == "table" {
        return extract_table(root, resolver).into_iter().collect();
    }

    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| tag(el) == "table")
        .filter_map(|table| extract_table(table, resolver))
        .collect()
}

/// Extract a single `<table>` element.
///
/// Header rule: the `<th>` cells of the first `<thead>` win (its `<td>` cells
/// when it has no `<th>`); without a `<thead>`, the first row's cells become
/// the headers and that row is dropped from the body. Body rule: rows inside
/// `<tbody>` sections when present, else all rows outside `<thead>`.
/// Rows and cells of tables nested inside cells are not attributed to this
/// table.
pub fn extract_table(table: ElementRef<'_>, resolver: &LinkResolver) -> Option<TableData> {
    if tag(&table) != "table" {
        return None;
    }

    let own = owned_elements(table);
    let rows: Vec<ElementRef<'_>> = own.iter().copied().filter(|el| tag(el) == "tr").collect();

    let caption = own
        .iter()
        .find(|el| tag(el) == "caption")
        .map(|caption| text_of(*caption))
        .filter(|text| !text.is_empty());

    let thead = own.iter().copied().find(|el| tag(el) == "thead");
    let first_row = rows.first().copied();

    let headers: Vec<String> = match thead {
        Some(thead) => header_section_labels(thead),
        None => first_row
            .map(|row| row_cells(row).into_iter().map(text_of).collect())
            .unwrap_or_default(),
    };

    let has_tbody = own.iter().any(|el| tag(el) == "tbody");
    let mut body: Vec<ElementRef<'_>> = rows
        .iter()
        .copied()
        .filter(|row| {
            let section = section_of(*row, table);
            if has_tbody {
                section == Some("tbody")
            } else {
                section != Some("thead")
            }
        })
        .collect();

    if thead.is_none() && !body.is_empty() && body.first().copied() == first_row {
        body.remove(0);
    }

    let mut data = TableData::new();
    data.caption = caption;
    data.headers = headers;

    for row in body {
        let cells: Vec<CellContent> = row_cells(row)
            .into_iter()
            .map(|cell| extract_cell(cell, resolver))
            .collect();
        if !cells.is_empty() {
            data.add_row(cells);
        }
    }

    if data.is_empty() {
        log::debug!("Dropping table without headers or rows");
        return None;
    }

    Some(data)
}

/// Elements belonging to `table`, not descending into nested tables.
fn owned_elements(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    descendants_excluding(table, &|el: &ElementRef<'_>| tag(el) == "table")
}

/// The row-group element (`thead`/`tbody`/`tfoot`) a row sits in, if any.
fn section_of<'a>(row: ElementRef<'a>, table: ElementRef<'a>) -> Option<&'a str> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .take_while(|ancestor| *ancestor != table)
        .map(|ancestor| ancestor.value().name())
        .find(|name| matches!(*name, "thead" | "tbody" | "tfoot"))
}

/// Header and data cells that are direct children of a row.
fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    child_elements(row)
        .filter(|cell| matches!(tag(cell), "th" | "td"))
        .collect()
}

fn header_section_labels(thead: ElementRef<'_>) -> Vec<String> {
    let cells = descendants_excluding(thead, &|el: &ElementRef<'_>| tag(el) == "table");
    let th: Vec<String> = cells
        .iter()
        .filter(|el| tag(el) == "th")
        .map(|el| text_of(*el))
        .collect();

    if !th.is_empty() {
        return th;
    }

    cells
        .iter()
        .filter(|el| tag(el) == "td")
        .map(|el| text_of(*el))
        .collect()
}

fn extract_cell(cell: ElementRef<'_>, resolver: &LinkResolver) -> CellContent {
    let never = |_: &ElementRef<'_>| false;
    let links = links_excluding(cell, resolver, true, &never);

    let lists = outermost(cell, &is_list)
        .into_iter()
        .filter_map(|list| {
            let kind = ListKind::from_tag(tag(&list))?;
            let items = descendants_excluding(list, &never)
                .into_iter()
                .filter(|el| tag(el) == "li")
                .map(|li| text_excluding(li, &is_list))
                .collect::<Vec<_>>();
            Some(CellList { kind, items })
        })
        .collect();

    CellContent {
        text: text_excluding(cell, &is_list),
        links,
        lists,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Link;
    use scraper::{Html, Selector};

    fn resolver() -> LinkResolver {
        LinkResolver::parse("https://kb.example.org/wiki/Home").unwrap()
    }

    fn parse_tables(html: &str) -> Vec<TableData> {
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse("div").unwrap();
        let root = doc.select(&sel).next().unwrap();
        extract_tables(root, &resolver())
    }

    fn texts(row: &[CellContent]) -> Vec<&str> {
        row.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_first_row_as_header() {
        let tables = parse_tables("<div><table><tr><td>A</td><td>B</td></tr><tr><td>1</td><td>2</td></tr></table></div>");
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].headers, vec!["A", "B"]);
        assert_eq!(tables[0].rows.len(), 1);
        assert_eq!(texts(&tables[0].rows[0]), vec!["1", "2"]);
    }

    #[test]
    fn test_explicit_thead_and_caption() {
        let tables = parse_tables(
            "<div><table><caption> Ports </caption>
               <thead><tr><th>Service</th><th>Port</th></tr></thead>
               <tbody><tr><td>ssh</td><td>22</td></tr><tr><td>http</td><td>80</td></tr></tbody>
             </table></div>",
        );
        let table = &tables[0];
        assert_eq!(table.caption.as_deref(), Some("Ports"));
        assert_eq!(table.headers, vec!["Service", "Port"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.to_text(),
            "Table: Ports\nService | Port\nssh | 22\nhttp | 80"
        );
    }

    #[test]
    fn test_empty_table_dropped() {
        let tables = parse_tables("<div><table></table><table><tr></tr></table></div>");
        assert!(tables.is_empty());
    }

    #[test]
    fn test_header_only_table_kept() {
        let tables = parse_tables("<div><table><tr><th>Only</th></tr></table></div>");
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].headers, vec!["Only"]);
        assert!(tables[0].rows.is_empty());
    }

    #[test]
    fn test_cell_links_and_lists() {
        let tables = parse_tables(
            r#"<div><table>
                 <tr><th>Page</th><th>Related</th></tr>
                 <tr>
                   <td><a href="tiki-index.php?page=Foo">Foo</a></td>
                   <td>See<ul><li><a href="/Bar"><span>Bar</span></a></li><li>Baz</li></ul></td>
                 </tr>
               </table></div>"#,
        );
        let row = &tables[0].rows[0];

        assert_eq!(row[0].text, "Foo");
        assert_eq!(
            row[0].links,
            vec![Link::new(
                "Foo",
                "https://kb.example.org/wiki/tiki-index.php?page=Foo"
            )]
        );

        assert_eq!(row[1].text, "See");
        assert_eq!(row[1].lists.len(), 1);
        assert_eq!(row[1].lists[0].items, vec!["Bar", "Baz"]);
        assert_eq!(row[1].links[0].text, "Bar");

        assert_eq!(
            tables[0].to_text(),
            "Page | Related\n\
             Foo (https://kb.example.org/wiki/tiki-index.php?page=Foo) | \
             See • [Bar](https://kb.example.org/Bar) • Baz"
        );
    }

    #[test]
    fn test_nested_table_rows_not_attributed() {
        let tables = parse_tables(
            "<div><table>
               <tr><td>H1</td></tr>
               <tr><td><table><tr><td>inner</td></tr><tr><td>x</td></tr></table></td></tr>
             </table></div>",
        );
        // outer table plus the nested one
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].headers, vec!["H1"]);
        assert_eq!(tables[0].rows.len(), 1);
        assert_eq!(tables[1].headers, vec!["inner"]);
        assert_eq!(texts(&tables[1].rows[0]), vec!["x"]);
    }

    #[test]
    fn test_single_table_root() {
        let doc = Html::parse_fragment("<table><tr><td>A</td></tr><tr><td>1</td></tr></table>");
        let sel = Selector::parse("table").unwrap();
        let table = doc.select(&sel).next().unwrap();
        let tables = extract_tables(table, &resolver());
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 1);
    }
}
