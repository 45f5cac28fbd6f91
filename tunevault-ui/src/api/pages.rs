//! Server-rendered HTML pages
//!
//! Pages are plain strings assembled with format!; everything user-supplied
//! goes through [`escape`] first.

use tunevault_common::db::models::{Album, Song, User};

use super::notice::Notice;

/// Minimal HTML escaping for text interpolated into pages
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, notice: Option<Notice>, body: &str) -> String {
    let banner = match notice {
        Some(n) => format!(r#"<p class="notice">{}</p>"#, n.message()),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - tunevault</title>
    <style>
        body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
               background-color: #1a1a1a; color: #e0e0e0; line-height: 1.6;
               max-width: 900px; margin: 0 auto; padding: 20px; }}
        a {{ color: #7ab8ff; text-decoration: none; }}
        nav {{ border-bottom: 1px solid #3a3a3a; padding-bottom: 10px; margin-bottom: 20px; }}
        nav a {{ margin-right: 15px; }}
        .notice {{ background-color: #4a3a1a; border: 1px solid #8a6a2a;
                   padding: 8px 12px; border-radius: 4px; }}
        .card {{ background-color: #2a2a2a; border: 1px solid #3a3a3a;
                 border-radius: 4px; padding: 12px; margin-bottom: 10px; }}
        .fav {{ color: #ffd700; }}
        img.logo {{ max-height: 80px; vertical-align: middle; margin-right: 10px; }}
        input, button {{ background-color: #2a2a2a; color: #e0e0e0;
                         border: 1px solid #3a3a3a; padding: 6px; }}
        form.inline {{ display: inline; }}
    </style>
</head>
<body>
    <nav>
        <a href="/">Albums</a>
        <a href="/songs">Songs</a>
        <a href="/logout">Log out</a>
    </nav>
    {banner}
    {body}
</body>
</html>
"#
    )
}

fn album_card(album: &Album) -> String {
    let star = if album.is_favourite { r#"<span class="fav">&#9733;</span> "# } else { "" };
    format!(
        r#"<div class="card">
    <img class="logo" src="/media/{logo}" alt="artwork">
    {star}<a href="/{id}/">{title}</a> &mdash; {artist} ({genre})
    <a href="/{id}/favourite/">[favourite]</a>
    <a href="/album/{id}/">[edit]</a>
    <form class="inline" method="post" action="/album/{id}/delete/"><button>delete</button></form>
</div>"#,
        id = album.id,
        logo = escape(&album.logo_path),
        title = escape(&album.title),
        artist = escape(&album.artist),
        genre = escape(&album.genre),
    )
}

/// Album index (also renders search results when `search` is set)
pub fn album_index_page(
    heading: &str,
    user: &User,
    albums: &[Album],
    notice: Option<Notice>,
    search: Option<&str>,
) -> String {
    let cards: String = albums.iter().map(album_card).collect();
    let results_note = match search {
        Some(q) => format!("<p>Search results for &quot;{}&quot;:</p>", escape(q)),
        None => String::new(),
    };
    let empty = if albums.is_empty() { "<p>No albums yet.</p>" } else { "" };

    let body = format!(
        r#"<h1>{heading}</h1>
<p>
    <a href="/album/add/">Add album</a>
    <a href="/user/{user_id}/edit">Edit profile</a>
</p>
<form method="get" action="/search/results/">
    <input type="text" name="q" placeholder="Search your albums">
    <button>Search</button>
</form>
{results_note}
{cards}
{empty}"#,
        heading = escape(heading),
        user_id = user.id,
    );

    layout("Albums", notice, &body)
}

/// Album detail: songs plus the artist's other albums
pub fn album_detail_page(
    album: &Album,
    songs: &[Song],
    related: &[Album],
    notice: Option<Notice>,
) -> String {
    let song_rows: String = songs
        .iter()
        .map(|song| {
            let star = if song.is_favourite { r#"<span class="fav">&#9733;</span> "# } else { "" };
            format!(
                r#"<div class="card">
    {star}{title}
    <audio controls src="/media/{audio}"></audio>
    <a href="/{album_id}/{id}/favourite/">[favourite]</a>
    <a href="/{album_id}/{id}/edit/">[edit]</a>
    <form class="inline" method="post" action="/songs/{id}/delete/"><button>delete</button></form>
</div>"#,
                id = song.id,
                album_id = album.id,
                title = escape(&song.title),
                audio = escape(&song.audio_path),
            )
        })
        .collect();

    let related_rows: String = related
        .iter()
        .map(|other| {
            format!(
                r#"<li><a href="/{id}/">{title}</a></li>"#,
                id = other.id,
                title = escape(&other.title),
            )
        })
        .collect();
    let related_section = if related.is_empty() {
        String::new()
    } else {
        format!("<h2>More by {}</h2><ul>{}</ul>", escape(&album.artist), related_rows)
    };

    let body = format!(
        r#"<h1><img class="logo" src="/media/{logo}" alt="artwork">{title} &mdash; {artist}</h1>
<p>{genre}
    <a href="/{id}/favourite/">[favourite]</a>
    <a href="/album/{id}/">[edit]</a>
</p>
<p><a href="/{id}/add/">Add song</a></p>
{song_rows}
{related_section}"#,
        id = album.id,
        logo = escape(&album.logo_path),
        title = escape(&album.title),
        artist = escape(&album.artist),
        genre = escape(&album.genre),
    );

    layout(&album.title, notice, &body)
}

/// Song list across the user's albums, with the optional search box
pub fn songs_page(songs: &[Song], search: Option<&str>, notice: Option<Notice>) -> String {
    let rows: String = songs
        .iter()
        .map(|song| {
            let star = if song.is_favourite { r#"<span class="fav">&#9733;</span> "# } else { "" };
            format!(
                r#"<div class="card">
    {star}{title}
    <audio controls src="/media/{audio}"></audio>
    <a href="/{album_id}/">[album]</a>
    <a href="/{album_id}/{id}/favourite/">[favourite]</a>
</div>"#,
                id = song.id,
                album_id = song.album_id,
                title = escape(&song.title),
                audio = escape(&song.audio_path),
            )
        })
        .collect();
    let empty = if songs.is_empty() { "<p>No songs found.</p>" } else { "" };

    let body = format!(
        r#"<h1>Your songs</h1>
<form method="get" action="/songs">
    <input type="text" name="s" value="{query}" placeholder="Search your songs">
    <button>Search</button>
</form>
{rows}
{empty}"#,
        query = escape(search.unwrap_or("")),
    );

    layout("Songs", notice, &body)
}

pub fn login_page(notice: Option<Notice>) -> String {
    let body = r#"<h1>Log in</h1>
<form method="post" action="/login/">
    <p><input type="text" name="username" placeholder="Username" required></p>
    <p><input type="password" name="password" placeholder="Password" required></p>
    <p><button>Log in</button></p>
</form>
<p>No account? <a href="/register/">Register</a></p>"#;

    layout("Log in", notice, body)
}

pub fn register_page(notice: Option<Notice>) -> String {
    let body = r#"<h1>Register</h1>
<form method="post" action="/register/">
    <p><input type="text" name="username" placeholder="Username" required></p>
    <p><input type="password" name="password" placeholder="Password" required></p>
    <p><input type="text" name="first_name" placeholder="First name"></p>
    <p><input type="text" name="last_name" placeholder="Last name"></p>
    <p><button>Register</button></p>
</form>
<p>Already registered? <a href="/login/">Log in</a></p>"#;

    layout("Register", notice, body)
}

/// Album create/edit form; `album` prefills the fields when editing
pub fn album_form_page(heading: &str, action: &str, album: Option<&Album>) -> String {
    let artist = album.map(|a| escape(&a.artist)).unwrap_or_default();
    let title = album.map(|a| escape(&a.title)).unwrap_or_default();
    let genre = album.map(|a| escape(&a.genre)).unwrap_or_default();
    let logo_note = if album.is_some() {
        "<p>Leave the artwork empty to keep the current one.</p>"
    } else {
        ""
    };

    let body = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="{action}" enctype="multipart/form-data">
    <p><input type="text" name="artist" value="{artist}" placeholder="Artist" required></p>
    <p><input type="text" name="title" value="{title}" placeholder="Title" required></p>
    <p><input type="text" name="genre" value="{genre}" placeholder="Genre" required></p>
    <p><input type="file" name="logo"></p>
    {logo_note}
    <p><button>Save</button></p>
</form>"#,
        heading = escape(heading),
    );

    layout(heading, None, &body)
}

/// Song create/edit form; `song` prefills the title when editing
pub fn song_form_page(heading: &str, action: &str, song: Option<&Song>) -> String {
    let title = song.map(|s| escape(&s.title)).unwrap_or_default();
    let audio_note = if song.is_some() {
        "<p>Leave the audio file empty to keep the current one.</p>"
    } else {
        ""
    };

    let body = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="{action}" enctype="multipart/form-data">
    <p><input type="text" name="title" value="{title}" placeholder="Title" required></p>
    <p><input type="file" name="audio_file"></p>
    {audio_note}
    <p><button>Save</button></p>
</form>"#,
        heading = escape(heading),
    );

    layout(heading, None, &body)
}

/// Profile edit form
pub fn profile_page(user: &User) -> String {
    let body = format!(
        r#"<h1>Edit profile</h1>
<form method="post" action="/user/{id}/edit">
    <p><input type="text" name="first_name" value="{first}" placeholder="First name"></p>
    <p><input type="text" name="last_name" value="{last}" placeholder="Last name"></p>
    <p><input type="password" name="password" placeholder="New password"></p>
    <p>Leave the password empty to keep the current one.</p>
    <p><button>Save</button></p>
</form>"#,
        id = user.id,
        first = escape(&user.first_name),
        last = escape(&user.last_name),
    );

    layout("Edit profile", None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn index_page_carries_heading_and_titles() {
        let user = User {
            id: 1,
            username: "alice".into(),
            password_hash: String::new(),
            first_name: "Alice".into(),
            last_name: String::new(),
        };
        let album = Album {
            id: 7,
            user_id: 1,
            artist: "Artist".into(),
            title: "My <Great> Album".into(),
            genre: "Rock".into(),
            logo_path: "x.png".into(),
            is_favourite: false,
        };

        let html = album_index_page("Alice's albums:", &user, &[album], None, None);
        assert!(html.contains("Alice&#39;s albums:"));
        assert!(html.contains("My &lt;Great&gt; Album"));
        assert!(html.contains(r#"href="/7/""#));
    }
}
