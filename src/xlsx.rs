//! XLSX Export Module
//! Writes the product table to a single-sheet Excel workbook.
//!
//! Uses direct ZIP/XML generation (SpreadsheetML) with inline strings, so no
//! shared-strings table is needed.

use crate::data::{Product, ProductOrder, ProductStore, StoreError};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use zip::write::FileOptions;
use zip::ZipWriter;

/// Header row written above the products
pub const HEADERS: [&str; 4] = ["ID", "Nombre", "Stock", "Precio"];
const SHEET_NAME: &str = "Sheet";
const COLUMNS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to read products: {0}")]
    Store(#[from] StoreError),
    #[error("Failed to write workbook: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to write workbook: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// A single worksheet cell
enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Integer(i64),
}

/// XLSX generator for the product table
pub struct XlsxExporter;

impl XlsxExporter {
    /// Export every product in natural order to `output_path`, overwriting it.
    /// Returns the number of data rows written.
    pub fn export_products(
        store: &ProductStore,
        output_path: &Path,
    ) -> Result<usize, ExportError> {
        let products = store.list_products(ProductOrder::Natural)?;
        Self::write_workbook(&products, output_path)?;

        tracing::info!(
            path = %output_path.display(),
            rows = products.len(),
            "Products exported"
        );
        Ok(products.len())
    }

    /// Write header plus one row per product, in the given order.
    /// The workbook is built in a sibling temp file and renamed over `output_path`,
    /// so a failed write never leaves a truncated file behind.
    pub fn write_workbook(products: &[Product], output_path: &Path) -> Result<(), ExportError> {
        let dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staging = NamedTempFile::new_in(dir)?;
        let mut zip = ZipWriter::new(staging);
        let options = FileOptions::default();

        // 1. [Content_Types].xml
        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(Self::content_types_xml().as_bytes())?;

        // 2. _rels/.rels
        zip.start_file("_rels/.rels", options)?;
        zip.write_all(Self::rels_xml().as_bytes())?;

        // 3. docProps
        zip.start_file("docProps/core.xml", options)?;
        zip.write_all(Self::core_props_xml().as_bytes())?;
        zip.start_file("docProps/app.xml", options)?;
        zip.write_all(Self::app_props_xml().as_bytes())?;

        // 4. Workbook and its relationships
        zip.start_file("xl/workbook.xml", options)?;
        zip.write_all(Self::workbook_xml().as_bytes())?;
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;
        zip.write_all(Self::workbook_rels_xml().as_bytes())?;

        // 5. Styles
        zip.start_file("xl/styles.xml", options)?;
        zip.write_all(Self::styles_xml().as_bytes())?;

        // 6. The sheet itself
        zip.start_file("xl/worksheets/sheet1.xml", options)?;
        zip.write_all(Self::sheet_xml(products).as_bytes())?;

        let staging = zip.finish()?;
        staging.persist(output_path).map_err(|e| e.error)?;
        Ok(())
    }

    fn sheet_xml(products: &[Product]) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheetData>
"#
        .to_string();

        let header: Vec<Cell> = HEADERS.iter().map(|&h| Cell::Text(h)).collect();
        Self::push_row(&mut xml, 1, &header);

        for (idx, product) in products.iter().enumerate() {
            let cells = [
                Cell::Integer(product.id),
                Cell::Text(&product.name),
                Cell::Integer(product.stock),
                Cell::Number(product.price),
            ];
            Self::push_row(&mut xml, idx + 2, &cells);
        }

        xml.push_str("</sheetData>\n</worksheet>");
        xml
    }

    fn push_row(xml: &mut String, row: usize, cells: &[Cell]) {
        xml.push_str(&format!(r#"<row r="{}">"#, row));
        for (col, cell) in COLUMNS.iter().zip(cells) {
            let cell_ref = format!("{}{}", col, row);
            match cell {
                Cell::Integer(v) => {
                    xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, v));
                }
                Cell::Number(v) if v.is_finite() => {
                    xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, v));
                }
                Cell::Number(v) => Self::push_text_cell(xml, &cell_ref, &v.to_string()),
                Cell::Text(text) => Self::push_text_cell(xml, &cell_ref, text),
            }
        }
        xml.push_str("</row>\n");
    }

    fn push_text_cell(xml: &mut String, cell_ref: &str, text: &str) {
        xml.push_str(&format!(
            r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
            cell_ref,
            escape_xml(text)
        ));
    }

    fn content_types_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#
    }

    fn rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#
    }

    fn workbook_xml() -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
<sheet name="{}" sheetId="1" r:id="rId1"/>
</sheets>
</workbook>"#,
            SHEET_NAME
        )
    }

    fn workbook_rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#
    }

    fn styles_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
<cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#
    }

    fn core_props_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:title>Productos</dc:title>
<dc:creator>Inventory Desk</dc:creator>
<cp:lastModifiedBy>Inventory Desk</cp:lastModifiedBy>
<cp:revision>1</cp:revision>
</cp:coreProperties>"#
    }

    fn app_props_xml() -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
<Application>Inventory Desk</Application>
<DocSecurity>0</DocSecurity>
<ScaleCrop>false</ScaleCrop>
<TitlesOfParts><vt:vector size="1" baseType="lpstr"><vt:lpstr>{}</vt:lpstr></vt:vector></TitlesOfParts>
<LinksUpToDate>false</LinksUpToDate>
<SharedDoc>false</SharedDoc>
<HyperlinksChanged>false</HyperlinksChanged>
<AppVersion>16.0000</AppVersion>
</Properties>"#,
            SHEET_NAME
        )
    }
}

/// Escape XML special characters and drop control characters XML 1.0 forbids.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NewProduct;
    use std::fs::{self, File};
    use std::io::Read;

    /// Read sheet1 back as rows of cell texts.
    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let file = File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();

        sheet
            .split("<row ")
            .skip(1)
            .map(|row| {
                row.split("<c ")
                    .skip(1)
                    .map(|cell| {
                        let (open, close) = if cell.contains("<v>") {
                            ("<v>", "</v>")
                        } else {
                            ("xml:space=\"preserve\">", "</t>")
                        };
                        let start = cell.find(open).unwrap() + open.len();
                        let end = cell.find(close).unwrap();
                        cell[start..end].to_string()
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn export_writes_header_and_one_row_per_product() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("productos_excel.xlsx");
        let store = ProductStore::open_in_memory().unwrap();
        store.insert_product(&NewProduct::new("Widget", 10, 2.5)).unwrap();
        store.insert_product(&NewProduct::new("Gadget", -2, 9.99)).unwrap();
        store.insert_product(&NewProduct::new("", 0, 0.0)).unwrap();

        let written = XlsxExporter::export_products(&store, &path).unwrap();
        assert_eq!(written, 3);

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec!["ID", "Nombre", "Stock", "Precio"]);
        assert_eq!(rows[1], vec!["1", "Widget", "10", "2.5"]);
        assert_eq!(rows[2], vec!["2", "Gadget", "-2", "9.99"]);
        assert_eq!(rows[3], vec!["3", "", "0", "0"]);
    }

    #[test]
    fn export_of_empty_store_has_only_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let store = ProductStore::open_in_memory().unwrap();

        assert_eq!(XlsxExporter::export_products(&store, &path).unwrap(), 0);
        assert_eq!(read_rows(&path).len(), 1);
    }

    #[test]
    fn export_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("productos_excel.xlsx");
        fs::write(&path, b"stale").unwrap();
        let store = ProductStore::open_in_memory().unwrap();
        store.insert_product(&NewProduct::new("Widget", 10, 2.5)).unwrap();

        XlsxExporter::export_products(&store, &path).unwrap();
        assert_eq!(read_rows(&path).len(), 2);
    }

    #[test]
    fn names_are_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("escaped.xlsx");
        let products = vec![Product {
            id: 7,
            name: "Nuts & <Bolts>".to_string(),
            stock: 1,
            price: 1.0,
        }];

        XlsxExporter::write_workbook(&products, &path).unwrap();
        assert_eq!(read_rows(&path)[1][1], "Nuts &amp; &lt;Bolts&gt;");
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xlsx");

        assert!(matches!(
            XlsxExporter::write_workbook(&[], &path),
            Err(ExportError::Io(_))
        ));
    }

    #[test]
    fn escape_drops_control_characters() {
        assert_eq!(escape_xml("a\u{1}b\tc"), "ab\tc");
    }

    #[test]
    fn export_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("productos_excel.xlsx");
        let store = ProductStore::open_in_memory().unwrap();
        store.insert_product(&NewProduct::new("Widget", 10, 2.5)).unwrap();

        XlsxExporter::export_products(&store, &path).unwrap();
        XlsxExporter::export_products(&store, &path).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("productos_excel.xlsx")]);
    }

    #[test]
    fn failed_rename_keeps_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory cannot be replaced by a file
        let path = dir.path().join("productos_excel.xlsx");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), b"keep").unwrap();

        assert!(matches!(
            XlsxExporter::write_workbook(&[], &path),
            Err(ExportError::Io(_))
        ));
        assert_eq!(fs::read(path.join("keep.txt")).unwrap(), b"keep");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
