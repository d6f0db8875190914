use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Walk every element of `content`, handing `(local_name, element)` to
/// `visit`. Returns the local name of the root element, if any.
pub(crate) fn visit_elements<F>(content: &str, mut visit: F) -> Result<Option<String>, String>
where
    F: FnMut(&[u8], &BytesStart<'_>) -> Result<(), String>,
{
    let mut reader = Reader::from_str(content.trim_start_matches('\u{feff}'));
    let mut root = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.local_name();
                if root.is_none() {
                    root = Some(String::from_utf8_lossy(name.as_ref()).into_owned());
                }
                visit(name.as_ref(), &e)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "malformed XML at byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
        }
    }

    Ok(root)
}

/// Unescaped value of the attribute whose local name is `name`
pub(crate) fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.local_name().as_ref() == name {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
