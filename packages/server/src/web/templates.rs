//! Embedded Tera templates.

use once_cell::sync::Lazy;
use tera::{Context, Tera};

/// Template engine with every page compiled in; a load failure is kept and
/// reported on each render instead of aborting the process.
static TEMPLATES: Lazy<Result<Tera, String>> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", BASE_TEMPLATE),
        ("home.html", HOME_TEMPLATE),
        ("search.html", SEARCH_TEMPLATE),
        ("assets.html", ASSETS_TEMPLATE),
        ("video.html", VIDEO_TEMPLATE),
        ("contact.html", CONTACT_TEMPLATE),
        ("error.html", ERROR_TEMPLATE),
        ("admin/base.html", ADMIN_BASE_TEMPLATE),
        ("admin/login.html", LOGIN_TEMPLATE),
        ("admin/reset_password.html", RESET_PASSWORD_TEMPLATE),
        ("admin/change_password.html", CHANGE_PASSWORD_TEMPLATE),
        ("admin/dashboard.html", DASHBOARD_TEMPLATE),
        ("admin/videos.html", VIDEOS_TEMPLATE),
        ("admin/video_form.html", VIDEO_FORM_TEMPLATE),
        ("admin/settings.html", SETTINGS_TEMPLATE),
    ])
    .map_err(|e| format!("{e:?}"))?;
    Ok(tera)
});

/// Render a template with context
pub fn render(template: &str, context: &Context) -> Result<String, tera::Error> {
    match &*TEMPLATES {
        Ok(tera) => tera.render(template, context),
        Err(e) => Err(tera::Error::msg(format!("templates failed to load: {e}"))),
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}{{ site.site_title }}{% endblock %}</title>
    {% block head %}{% endblock %}
    <style>
        * { box-sizing: border-box; }
        body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; color: #111827; background: #f9fafb; line-height: 1.6; }
        a { color: #2563eb; text-decoration: none; }
        a:hover { text-decoration: underline; }
        .container { max-width: 1100px; margin: 0 auto; padding: 0 20px; }
        .hero { background: #111827 center/cover no-repeat; color: #fff; padding: 48px 0; }
        .hero h1 { margin: 0; font-size: 2.2rem; }
        .hero p { margin: 4px 0 0; opacity: .85; }
        nav.main { background: #fff; border-bottom: 1px solid #e5e7eb; }
        nav.main .container { display: flex; gap: 20px; padding-top: 12px; padding-bottom: 12px; }
        main { padding: 32px 0; }
        footer { border-top: 1px solid #e5e7eb; padding: 24px 0; color: #6b7280; font-size: .9rem; }
        .layout { display: grid; grid-template-columns: 1fr 280px; gap: 32px; }
        .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 20px; }
        .card { background: #fff; border: 1px solid #e5e7eb; border-radius: 8px; overflow: hidden; }
        .card img { width: 100%; height: 160px; object-fit: cover; display: block; }
        .card .body { padding: 12px; }
        .tag { display: inline-block; background: #eef2ff; color: #3730a3; border-radius: 999px; padding: 0 10px; margin: 2px; font-size: .8rem; }
        .muted { color: #6b7280; }
        .flash { padding: 10px 14px; border-radius: 6px; margin-bottom: 16px; }
        .flash.success { background: #dcfce7; color: #166534; }
        .flash.error { background: #fee2e2; color: #991b1b; }
        .btn { display: inline-block; background: #2563eb; color: #fff; border: 0; border-radius: 6px; padding: 8px 14px; cursor: pointer; font-size: .95rem; }
        .btn.danger { background: #dc2626; }
        .btn.secondary { background: #6b7280; }
        label { display: block; font-weight: 600; margin-top: 12px; }
        input[type=text], input[type=email], input[type=password], input[type=url], textarea, select { width: 100%; padding: 8px; border: 1px solid #d1d5db; border-radius: 6px; font: inherit; }
        table { width: 100%; border-collapse: collapse; background: #fff; }
        th, td { text-align: left; padding: 8px 10px; border-bottom: 1px solid #e5e7eb; }
        @media (max-width: 800px) { .layout { grid-template-columns: 1fr; } }
    </style>
</head>
<body>
    <header class="hero"{% if site.cover_image_url %} style="background-image: linear-gradient(rgba(0,0,0,.45), rgba(0,0,0,.45)), url('{{ site.cover_image_url }}')"{% endif %}>
        <div class="container">
            <h1><a href="/" style="color:inherit">{{ site.site_title }}</a></h1>
            <p>{{ site.site_subtitle }}</p>
        </div>
    </header>
    <nav class="main">
        <div class="container">
            <a href="/">Home</a>
            <a href="/assets">Assets</a>
            <a href="/contact">Contact</a>
            {% if is_admin %}<a href="/admin">Admin</a>{% endif %}
        </div>
    </nav>
    <main>
        <div class="container">
            {% block content %}{% endblock %}
        </div>
    </main>
    <footer>
        <div class="container">{{ site.site_title }}</div>
    </footer>
</body>
</html>
"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<div class="layout">
    <section>
        {% if searched %}
        <h2>Search results ({{ results | length }})</h2>
        {% if results | length == 0 %}<p class="muted">No videos match "{{ query }}".</p>{% endif %}
        <div class="grid">
            {% for video in results %}
            <div class="card">
                {% if video.thumbnail_url %}<a href="{{ video.href | safe }}"><img src="{{ video.thumbnail_url }}" alt="{{ video.title }}"></a>{% endif %}
                <div class="body">
                    <a href="{{ video.href | safe }}"><strong>{{ video.title }}</strong></a>
                    <div class="muted">{{ video.created_at }}</div>
                </div>
            </div>
            {% endfor %}
        </div>
        <hr>
        {% endif %}
        <h2>Latest videos</h2>
        {% if videos | length == 0 %}<p class="muted">No videos yet.</p>{% endif %}
        <div class="grid">
            {% for video in videos %}
            <div class="card">
                {% if video.thumbnail_url %}<a href="{{ video.href | safe }}"><img src="{{ video.thumbnail_url }}" alt="{{ video.title }}"></a>{% endif %}
                <div class="body">
                    <a href="{{ video.href | safe }}"><strong>{{ video.title }}</strong></a>
                    <div class="muted">{{ video.created_at }}</div>
                    {% for tag in video.tags %}<span class="tag">{{ tag }}</span>{% endfor %}
                </div>
            </div>
            {% endfor %}
        </div>
    </section>
    <aside>
        <h3>Search</h3>
        <form method="get" action="/">
            <input type="text" name="q" value="{{ query }}" placeholder="Title, slug or tag">
            <p><button class="btn" type="submit">Search</button></p>
        </form>
    </aside>
</div>
{% endblock %}
"##;

const SEARCH_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Search - {{ site.site_title }}{% endblock %}
{% block content %}
<form method="get" action="/search">
    <input type="text" name="q" value="{{ query }}" placeholder="Title, slug or tag">
    <p><button class="btn" type="submit">Search</button></p>
</form>
{% if searched %}
<h2>Search results ({{ results | length }})</h2>
{% if results | length == 0 %}<p class="muted">No videos match "{{ query }}".</p>{% endif %}
<div class="grid">
    {% for video in results %}
    <div class="card">
        {% if video.thumbnail_url %}<a href="{{ video.href | safe }}"><img src="{{ video.thumbnail_url }}" alt="{{ video.title }}"></a>{% endif %}
        <div class="body">
            <a href="{{ video.href | safe }}"><strong>{{ video.title }}</strong></a>
            <div class="muted">{{ video.created_at }}</div>
            {% for tag in video.tags %}<span class="tag">{{ tag }}</span>{% endfor %}
        </div>
    </div>
    {% endfor %}
</div>
{% endif %}
{% endblock %}
"##;

const ASSETS_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Assets - {{ site.site_title }}{% endblock %}
{% block content %}
<h2>Asset library</h2>
<form method="get" action="/assets">
    <label for="type">Type</label>
    <select id="type" name="type">
        <option value="all"{% if not selected_type %} selected{% endif %}>All types</option>
        {% for t in types %}<option value="{{ t }}"{% if selected_type == t %} selected{% endif %}>{{ t }}</option>{% endfor %}
    </select>
    <label for="sort">Sort by</label>
    <select id="sort" name="sort">
        <option value="created_at"{% if sort == "created_at" %} selected{% endif %}>Most recent</option>
        <option value="download_count"{% if sort == "download_count" %} selected{% endif %}>Most downloaded</option>
    </select>
    <p><button class="btn" type="submit">Apply</button></p>
</form>
{% if assets | length == 0 %}<p class="muted">No assets found.</p>{% endif %}
<div class="grid">
    {% for asset in assets %}
    <div class="card">
        {% if asset.thumbnail_url %}<img src="{{ asset.thumbnail_url }}" alt="{{ asset.name }}">{% endif %}
        <div class="body">
            <strong>{{ asset.name }}</strong>
            <div class="muted">{{ asset.mime_type }} · {{ asset.download_count }} downloads</div>
            {% if asset.video_href %}<div><a href="{{ asset.video_href | safe }}">{{ asset.video_title }}</a></div>{% endif %}
            <p><a class="btn" href="{{ asset.download_url | safe }}">Download</a></p>
        </div>
    </div>
    {% endfor %}
</div>
{% endblock %}
"##;

const VIDEO_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}{{ video.title }} - {{ site.site_title }}{% endblock %}
{% block content %}
<article>
    <h2>{{ video.title }}</h2>
    {% if edit_href %}<p><a class="btn secondary" href="{{ edit_href | safe }}">Edit Video</a></p>{% endif %}
    {% if video.thumbnail_url %}<img src="{{ video.thumbnail_url }}" alt="{{ video.title }}" style="max-width:300px;border-radius:8px">{% endif %}
    <p><a href="{{ video.tiktok_url }}" target="_blank" rel="noopener">Watch on TikTok</a></p>
    <p>{{ video.description | escape | linebreaksbr | safe }}</p>
    <p>{% for tag in video.tags %}<span class="tag">{{ tag }}</span>{% endfor %}</p>
    <p class="muted">{{ video.created_at }}</p>

    <h3>Assets</h3>
    {% if assets | length == 0 %}<p class="muted">No assets for this video.</p>{% endif %}
    <div class="grid">
        {% for asset in assets %}
        <div class="card">
            {% if asset.thumbnail_url %}<img src="{{ asset.thumbnail_url }}" alt="{{ asset.name }}">{% endif %}
            <div class="body">
                <strong>{{ asset.name }}</strong>
                <div class="muted">{{ asset.mime_type }} · {{ asset.download_count }} downloads</div>
                <p><a class="btn" href="{{ asset.download_url | safe }}">Download</a></p>
            </div>
        </div>
        {% endfor %}
    </div>

    <section id="comments">
    {% if comment_provider == "giscus" %}
        <script src="https://giscus.app/client.js"
            data-repo="{{ giscus.repo }}"
            data-repo-id="{{ giscus.repo_id }}"
            data-category="{{ giscus.category }}"
            data-category-id="{{ giscus.category_id }}"
            data-mapping="specific"
            data-term="{{ video.slug }}"
            data-theme="{{ giscus.theme }}"
            data-strict="1"
            crossorigin="anonymous"
            async></script>
    {% elif comment_provider == "cusdis" %}
        <div id="cusdis_thread"
            data-host="{{ cusdis.host }}"
            data-app-id="{{ cusdis.app_id }}"
            data-page-id="{{ video.slug }}"
            data-page-url="{{ page_url }}"
            data-page-title="{{ video.title }}"></div>
        <script async defer src="{{ cusdis.host }}/js/cusdis.es.js"></script>
    {% else %}
        <h3>Comments ({{ comments | length }})</h3>
        {% if comments | length == 0 %}<p class="muted">No comments yet. Be the first to comment!</p>{% endif %}
        {% for comment in comments %}
        <div class="card" style="margin-bottom:12px"><div class="body">
            <strong>{{ comment.name }}</strong> <span class="muted">{{ comment.created_at }}</span>
            <p>{{ comment.content }}</p>
        </div></div>
        {% endfor %}
        <h3>Leave a comment</h3>
        {% if flash %}<div class="flash {{ flash.kind }}">{{ flash.text }}</div>{% endif %}
        <form method="post" action="{{ video.href | safe }}/comments">
            <label for="name">Name *</label>
            <input type="text" id="name" name="name" required>
            <label for="email">Email *</label>
            <input type="email" id="email" name="email" required>
            <label for="content">Comment *</label>
            <textarea id="content" name="content" rows="4" required></textarea>
            <p><button class="btn" type="submit">Post comment</button></p>
        </form>
    {% endif %}
    </section>
</article>
{% endblock %}
"##;

const CONTACT_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Contact - {{ site.site_title }}{% endblock %}
{% block content %}
<h2>Contact</h2>
{% if sent %}
<div class="flash success">Thanks for reaching out! We'll get back to you soon.</div>
{% else %}
<form method="post" action="/contact">
    <label for="name">Name</label>
    <input type="text" id="name" name="name" required>
    <label for="email">Email</label>
    <input type="email" id="email" name="email" required>
    <label for="message">Message</label>
    <textarea id="message" name="message" rows="5" required></textarea>
    <p><button class="btn" type="submit">Send</button></p>
</form>
{% endif %}
{% endblock %}
"##;

const ERROR_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Error {{ status }} - {{ site.site_title }}{% endblock %}
{% block content %}
<h2>{{ status }}</h2>
<p>{{ message }}</p>
<p><a href="/">Back to home</a></p>
{% endblock %}
"##;

const ADMIN_BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}Admin{% endblock %} - {{ site.site_title }}</title>
    {% block head %}{% endblock %}
    <style>
        * { box-sizing: border-box; }
        body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; color: #111827; background: #f3f4f6; line-height: 1.6; }
        a { color: #2563eb; text-decoration: none; }
        .bar { background: #111827; color: #fff; }
        .bar .container { display: flex; gap: 18px; align-items: center; padding-top: 12px; padding-bottom: 12px; }
        .bar a { color: #e5e7eb; }
        .bar form { margin-left: auto; }
        .container { max-width: 1000px; margin: 0 auto; padding: 0 20px; }
        main { padding: 28px 0; }
        .narrow { max-width: 420px; }
        .stats { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }
        .stat { background: #fff; border-radius: 8px; padding: 16px; }
        .stat strong { display: block; font-size: 1.8rem; }
        .flash { padding: 10px 14px; border-radius: 6px; margin-bottom: 16px; }
        .flash.success { background: #dcfce7; color: #166534; }
        .flash.error { background: #fee2e2; color: #991b1b; }
        .btn { display: inline-block; background: #2563eb; color: #fff; border: 0; border-radius: 6px; padding: 8px 14px; cursor: pointer; font-size: .95rem; }
        .btn.danger { background: #dc2626; }
        .btn.link { background: none; color: #e5e7eb; padding: 0; }
        label { display: block; font-weight: 600; margin-top: 12px; }
        input[type=text], input[type=email], input[type=password], input[type=url], textarea { width: 100%; padding: 8px; border: 1px solid #d1d5db; border-radius: 6px; font: inherit; }
        table { width: 100%; border-collapse: collapse; background: #fff; }
        th, td { text-align: left; padding: 8px 10px; border-bottom: 1px solid #e5e7eb; }
        .muted { color: #6b7280; }
        img.thumb { max-width: 200px; border-radius: 6px; }
    </style>
</head>
<body>
    {% if is_admin %}
    <div class="bar">
        <div class="container">
            <a href="/admin">Dashboard</a>
            <a href="/admin/videos">Videos</a>
            <a href="/admin/videos/new">Add Video</a>
            <a href="/admin/settings">Settings</a>
            <a href="/admin/change-password">Change Password</a>
            <a href="/">View Site</a>
            <form method="post" action="/admin/logout"><button class="btn link" type="submit">Logout</button></form>
        </div>
    </div>
    {% endif %}
    <main>
        <div class="container">
            {% if flash %}<div class="flash {{ flash.kind }}">{{ flash.text }}</div>{% endif %}
            {% block content %}{% endblock %}
        </div>
    </main>
</body>
</html>
"##;

const LOGIN_TEMPLATE: &str = r##"{% extends "admin/base.html" %}
{% block title %}Admin Login{% endblock %}
{% block content %}
<div class="narrow">
    <h2>Admin Login</h2>
    <form method="post" action="/admin/login">
        <label for="email">Email</label>
        <input type="email" id="email" name="email" value="{{ email }}" required>
        <label for="password">Password</label>
        <input type="password" id="password" name="password" required>
        <p><button class="btn" type="submit">Sign in</button></p>
    </form>
    <h3>Forgot your password?</h3>
    <form method="post" action="/admin/forgot-password">
        <label for="reset-email">Email</label>
        <input type="email" id="reset-email" name="email" required>
        <p><button class="btn" type="submit">Send reset link</button></p>
    </form>
</div>
{% endblock %}
"##;

const RESET_PASSWORD_TEMPLATE: &str = r##"{% extends "admin/base.html" %}
{% block title %}Reset Password{% endblock %}
{% block head %}{% if redirect_to_login %}<meta http-equiv="refresh" content="3;url=/admin/login">{% endif %}{% endblock %}
{% block content %}
<div class="narrow">
    <h2>Reset Password</h2>
    {% if session_message %}<div class="flash error" id="session-message">{{ session_message }}</div>{% endif %}
    {% if has_session %}
    <form method="post" action="/admin/reset-password">
        <label for="password">New password</label>
        <input type="password" id="password" name="password" minlength="6" required>
        <label for="confirm_password">Confirm new password</label>
        <input type="password" id="confirm_password" name="confirm_password" minlength="6" required>
        <p><button class="btn" type="submit">Update password</button></p>
    </form>
    {% endif %}
    <p><a href="/admin/login">Back to login</a></p>
    <form id="recovery-form" method="post" action="/admin/reset-password/session" style="display:none">
        <input type="hidden" id="fragment" name="fragment">
    </form>
    <script>
    (function () {
        var hash = window.location.hash;
        if (!hash || hash.indexOf('access_token=') === -1) { return; }
        var message = document.getElementById('session-message');
        if (message) { message.style.display = 'none'; }
        document.getElementById('fragment').value = hash.substring(1);
        history.replaceState(null, '', window.location.pathname);
        document.getElementById('recovery-form').submit();
    })();
    </script>
</div>
{% endblock %}
"##;

const CHANGE_PASSWORD_TEMPLATE: &str = r##"{% extends "admin/base.html" %}
{% block title %}Change Password{% endblock %}
{% block content %}
<div class="narrow">
    <h2>Change Password</h2>
    <form method="post" action="/admin/change-password">
        <label for="password">New password</label>
        <input type="password" id="password" name="password" minlength="6" required>
        <label for="confirm_password">Confirm new password</label>
        <input type="password" id="confirm_password" name="confirm_password" minlength="6" required>
        <p><button class="btn" type="submit">Update password</button></p>
    </form>
</div>
{% endblock %}
"##;

const DASHBOARD_TEMPLATE: &str = r##"{% extends "admin/base.html" %}
{% block title %}Dashboard{% endblock %}
{% block content %}
<h2>Dashboard</h2>
<p class="muted">Signed in as {{ admin_email }}</p>
<div class="stats">
    <div class="stat"><strong>{{ stats.videos }}</strong>Videos</div>
    <div class="stat"><strong>{{ stats.assets }}</strong>Assets</div>
    <div class="stat"><strong>{{ stats.comments }}</strong>Comments</div>
    <div class="stat"><strong>{{ stats.downloads }}</strong>Downloads</div>
</div>
<h3>Most downloaded assets</h3>
<table>
    <tr><th>Asset</th><th>Video</th><th>Type</th><th>Downloads</th></tr>
    {% for asset in top_assets %}
    <tr>
        <td>{{ asset.name }}</td>
        <td>{% if asset.video_href %}<a href="{{ asset.video_href | safe }}">{{ asset.video_title }}</a>{% endif %}</td>
        <td>{{ asset.mime_type }}</td>
        <td>{{ asset.download_count }}</td>
    </tr>
    {% else %}
    <tr><td colspan="4" class="muted">No assets yet.</td></tr>
    {% endfor %}
</table>
{% endblock %}
"##;

const VIDEOS_TEMPLATE: &str = r##"{% extends "admin/base.html" %}
{% block title %}Videos{% endblock %}
{% block content %}
<h2>Videos</h2>
<p><a class="btn" href="/admin/videos/new">Add Video</a></p>
<table>
    <tr><th>Title</th><th>Slug</th><th>Created</th><th></th></tr>
    {% for video in videos %}
    <tr>
        <td><a href="{{ video.href | safe }}">{{ video.title }}</a></td>
        <td>{{ video.slug }}</td>
        <td>{{ video.created_at }}</td>
        <td><a href="/admin/videos/{{ video.id }}/edit">Edit</a></td>
    </tr>
    {% else %}
    <tr><td colspan="4" class="muted">No videos yet.</td></tr>
    {% endfor %}
</table>
{% endblock %}
"##;

const VIDEO_FORM_TEMPLATE: &str = r##"{% extends "admin/base.html" %}
{% block title %}{% if video %}Edit Video{% else %}Add Video{% endif %}{% endblock %}
{% block content %}
<h2>{% if video %}Edit Video{% else %}Add Video{% endif %}</h2>
<form method="post" action="{{ action }}" enctype="multipart/form-data">
    <label for="title">Title *</label>
    <input type="text" id="title" name="title" value="{{ form.title }}" required>
    <label for="slug">Slug</label>
    <input type="text" id="slug" name="slug" value="{{ form.slug }}" placeholder="Generated from the title when empty">
    <label for="tiktok_url">TikTok URL *</label>
    <input type="url" id="tiktok_url" name="tiktok_url" value="{{ form.tiktok_url }}" required>
    <label for="description">Description</label>
    <textarea id="description" name="description" rows="5">{{ form.description }}</textarea>
    <label for="tags">Tags (comma separated)</label>
    <input type="text" id="tags" name="tags" value="{{ form.tags }}">
    <label for="cover_image">Cover image</label>
    {% if video and video.thumbnail_url %}<p><img class="thumb" src="{{ video.thumbnail_url }}" alt="Current cover"></p>{% endif %}
    <input type="file" id="cover_image" name="cover_image" accept="image/*">
    <p><button class="btn" type="submit">{% if video %}Save changes{% else %}Add video{% endif %}</button></p>
</form>
{% if video %}
<form method="post" action="/admin/videos/{{ video.id }}/delete" onsubmit="return confirm('Delete this video and all of its assets and comments?');">
    <button class="btn danger" type="submit">Delete video</button>
</form>

<h3>Assets</h3>
<table>
    <tr><th>Name</th><th>Type</th><th>Downloads</th><th></th></tr>
    {% for asset in assets %}
    <tr>
        <td>{% if asset.thumbnail_url %}<img class="thumb" src="{{ asset.thumbnail_url }}" alt="{{ asset.name }}"><br>{% endif %}<a href="{{ asset.blob_url }}">{{ asset.name }}</a></td>
        <td>{{ asset.mime_type }}</td>
        <td>{{ asset.download_count }}</td>
        <td>
            <form method="post" action="/admin/videos/{{ video.id }}/assets/{{ asset.id }}/delete" onsubmit="return confirm('Delete this asset?');">
                <button class="btn danger" type="submit">Delete</button>
            </form>
        </td>
    </tr>
    {% else %}
    <tr><td colspan="4" class="muted">No assets yet.</td></tr>
    {% endfor %}
</table>

<h3>Add asset</h3>
<form method="post" action="/admin/videos/{{ video.id }}/assets" enctype="multipart/form-data">
    <label for="asset-name">Name</label>
    <input type="text" id="asset-name" name="name" placeholder="Defaults to the file name">
    <label for="asset-file">File *</label>
    <input type="file" id="asset-file" name="file">
    <p><button class="btn" type="submit">Upload asset</button></p>
</form>
{% endif %}
{% endblock %}
"##;

const SETTINGS_TEMPLATE: &str = r##"{% extends "admin/base.html" %}
{% block title %}Settings{% endblock %}
{% block content %}
<h2>Site Settings</h2>
<form method="post" action="/admin/settings" enctype="multipart/form-data">
    <label for="site_title">Site title *</label>
    <input type="text" id="site_title" name="site_title" value="{{ form.site_title }}" required>
    <label for="site_subtitle">Site subtitle</label>
    <input type="text" id="site_subtitle" name="site_subtitle" value="{{ form.site_subtitle }}">
    <label for="cover_image">Cover image</label>
    {% if site.cover_image_url %}<p><img class="thumb" src="{{ site.cover_image_url }}" alt="Current cover"></p>{% endif %}
    <input type="file" id="cover_image" name="cover_image" accept="image/*">
    <p><button class="btn" type="submit">Save settings</button></p>
</form>
{% endblock %}
"##;
