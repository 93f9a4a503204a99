use pulldown_cmark::{Options, Parser, html};

use crate::convert::ConvertError;

pub fn convert(bytes: &[u8]) -> Result<String, ConvertError> {
    let source =
        std::str::from_utf8(bytes).map_err(|e| ConvertError::Encoding(e.to_string()))?;

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(source, options);

    let mut body = String::new();
    html::push_html(&mut body, parser);
    Ok(body)
}
