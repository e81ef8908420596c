// src/test_support.rs
//
// Minimal .xlsx packages for tests: one worksheet, inline strings, no styles.

use anyhow::Result;
use std::{
    fmt::Write as _,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use zip::write::FileOptions;
use zip::CompressionMethod;

pub(crate) fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ideb_approval=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Empty,
}

pub(crate) use Cell::{Empty, Number, Text};

const TITLE_ROWS: [&str; 6] = [
    "Ministério da Educação",
    "Instituto Nacional de Estudos e Pesquisas Educacionais Anísio Teixeira",
    "Diretoria de Estatísticas Educacionais",
    "IDEB - Resultados e Metas",
    "Anos Finais do Ensino Fundamental",
    "Municípios",
];

pub(crate) const HEADER: [&str; 7] = [
    "Sigla da UF",
    "Código do Município",
    "Nome do Município",
    "Rede",
    "Taxa de Aprovação - 2017",
    "Taxa de Aprovação - 2019",
    "Taxa de Aprovação - 20212",
];

/// Six title rows, then `header`, then `data`: the INEP sheet layout.
pub(crate) fn ideb_sheet<'a>(header: &[&'a str], data: &[Vec<Cell<'a>>]) -> Vec<Vec<Cell<'a>>> {
    let mut rows: Vec<Vec<Cell<'a>>> = TITLE_ROWS.iter().map(|t| vec![Text(*t)]).collect();
    rows.push(header.iter().map(|h| Text(*h)).collect());
    rows.extend(data.iter().cloned());
    rows
}

fn column_letters(mut idx: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn sheet_xml(rows: &[Vec<Cell<'_>>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        if row.iter().all(|c| matches!(c, Empty)) {
            continue;
        }
        let _ = write!(xml, r#"<row r="{}">"#, r + 1);
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_letters(c), r + 1);
            match cell {
                Text(s) => {
                    let _ = write!(
                        xml,
                        r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                        reference,
                        escape(s)
                    );
                }
                Number(n) => {
                    let _ = write!(xml, r#"<c r="{}"><v>{}</v></c>"#, reference, n);
                }
                Empty => {}
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Anos Finais" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Write `rows` as the single sheet of `dir/name` and return its path.
pub(crate) fn write_xlsx(dir: &Path, name: &str, rows: &[Vec<Cell<'_>>]) -> Result<PathBuf> {
    let path = dir.join(name);
    let mut zip = zip::ZipWriter::new(File::create(&path)?);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Stored);

    let sheet = sheet_xml(rows);
    let parts: [(&str, &str); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", &sheet),
    ];
    for (part, body) in parts {
        zip.start_file(part, options)?;
        zip.write_all(body.as_bytes())?;
    }
    zip.finish()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters_roll_over() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(6), "G");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
    }
}
