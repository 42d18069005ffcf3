//! Plain-text list renderer: title as the headline, body indented beneath.

use std::fmt::{self, Write};

use posts_core::Post;

pub fn render_posts(out: &mut impl Write, posts: &[Post]) -> fmt::Result {
    for (i, post) in posts.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", post.title)?;
        for line in post.body.lines() {
            writeln!(out, "    {line}")?;
        }
    }
    Ok(())
}
