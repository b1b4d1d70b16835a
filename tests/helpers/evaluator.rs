//! A stand-in for the configuration-language evaluator.
//!
//! It only understands `import '<address>'` and `importstr '<address>'`:
//! every import is resolved through the dispatcher and replaced by its
//! expanded content, `importstr` by its content as a quoted string. Nested
//! imports are resolved relative to the `found_at` of the content they
//! appear in, the same way a real evaluator re-enters the importer.

use importer::{Dispatcher, FileSystem, ImportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Import,
    ImportStr,
}

/// Expands the file `main` read straight from `fs`.
pub fn evaluate(dispatcher: &mut Dispatcher, fs: &dyn FileSystem, main: &str) -> Result<String, ImportError> {
    let bytes = fs.read(main).map_err(|e| ImportError::io(main, e))?;
    let content = String::from_utf8(bytes).expect("fixture files are UTF-8");
    expand(dispatcher, main, &content)
}

/// Expands every import in `content`, which was found at `found_at`.
pub fn expand(dispatcher: &mut Dispatcher, found_at: &str, content: &str) -> Result<String, ImportError> {
    let mut out = String::new();
    let mut rest = content;

    while let Some((before, keyword, address, after)) = next_import(rest) {
        out.push_str(before);

        let resolution = dispatcher.resolve(found_at, &address)?;
        match keyword {
            Keyword::Import => {
                let expanded = expand(dispatcher, &resolution.found_at, &resolution.content)?;
                out.push_str(&expanded);
            }
            Keyword::ImportStr => out.push_str(&format!("{:?}", resolution.content)),
        }

        rest = after;
    }

    out.push_str(rest);
    Ok(out)
}

/// Splits at the first import: text before it, its keyword, the unescaped
/// address and the text after the closing quote.
fn next_import(text: &str) -> Option<(&str, Keyword, String, &str)> {
    let import = text.find("import '").map(|idx| (idx, Keyword::Import, "import '".len()));
    let import_str = text
        .find("importstr '")
        .map(|idx| (idx, Keyword::ImportStr, "importstr '".len()));

    let (start, keyword, len) = match (import, import_str) {
        (Some(a), Some(b)) => if a.0 <= b.0 { a } else { b },
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };

    let literal = &text[start + len..];
    let mut address = String::new();
    let mut chars = literal.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    address.push(escaped);
                }
            }
            '\'' => return Some((&text[..start], keyword, address, &literal[idx + 1..])),
            c => address.push(c),
        }
    }
    panic!("unterminated import string in {text:?}");
}
