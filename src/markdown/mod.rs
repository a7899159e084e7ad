//! Line-oriented renderer for the markdown subset used in AI-written report text.
//!
//! Each input line becomes exactly one [`Block`]:
//!
//! - `### `, `## `, `# ` prefixes produce headings (level 3, 2, 1)
//! - `- ` and `* ` prefixes produce list items
//! - blank lines produce [`Block::LineBreak`]
//! - everything else is a paragraph
//!
//! Inside a line the renderer recognises `**bold**`/`__bold__`, `*italic*`/`_italic_`,
//! `` `code` `` and `[text](url)`. There is no cross-line state: fenced code blocks, nested
//! lists and blockquotes are not supported. Rendering never fails; markup that does not
//! match simply stays literal text.
//!
//! # Example
//!
//! ```
//! use contractiq::markdown::{Block, InlineSpan, render_markdown};
//!
//! let blocks = render_markdown("## Risks\n- **Unlimited** liability");
//! let heading = Block::Heading { level: 2, spans: vec![InlineSpan::Text("Risks".into())] };
//! assert_eq!(blocks[0], heading);
//! assert_eq!(
//!     blocks[1],
//!     Block::ListItem(vec![
//!         InlineSpan::Bold("Unlimited".into()),
//!         InlineSpan::Text(" liability".into()),
//!     ])
//! );
//! ```

pub mod ast;
pub mod blocks;
pub mod inline;

pub use ast::{Block, InlineSpan};
pub use blocks::{blocks, render_line, render_markdown};
pub use inline::parse_inline;
