use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    states::RawKind, BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};

/// One token of the source markup, in the order it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TagOpen {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// A whole run of text between two pieces of markup, entities decoded.
    Text(String),
}

#[derive(Debug, Default)]
struct Sink {
    events: Vec<Event>,
    text: String,
}

impl Sink {
    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.events.push(Event::Text(std::mem::take(&mut self.text)));
        }
    }
}

impl TokenSink for Sink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match &token {
            Token::CharacterTokens(text) => {
                self.text.push_str(text);
                return TokenSinkResult::Continue;
            }
            Token::NullCharacterToken => {
                self.text.push('\0');
                return TokenSinkResult::Continue;
            }
            Token::ParseError(_) => return TokenSinkResult::Continue,
            _ => self.flush_text(),
        }
        let Token::TagToken(tag) = token else {
            return TokenSinkResult::Continue;
        };
        if tag.kind != TagKind::StartTag {
            return TokenSinkResult::Continue;
        }
        let name = tag.name.to_string();
        self.events.push(Event::TagOpen {
            attrs: tag
                .attrs
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect(),
            name,
        });
        // script and style bodies are text, not markup
        match &*tag.name {
            "script" if !tag.self_closing => TokenSinkResult::RawData(RawKind::ScriptData),
            "style" if !tag.self_closing => TokenSinkResult::RawData(RawKind::Rawtext),
            _ => TokenSinkResult::Continue,
        }
    }
}

/// Tokenizes `html` without building a tree, so nothing is added, dropped or
/// moved around the way a document parser would. Only start tags and text
/// are reported; end tags, comments and doctypes are not.
pub fn events(html: &str) -> impl Iterator<Item = Event> {
    let mut tokenizer = Tokenizer::new(Sink::default(), TokenizerOpts::default());
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();
    tokenizer.sink.events.into_iter()
}
