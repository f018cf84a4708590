use chrono::{DateTime, Utc};
use models::{GithubProfile, LikeRecord, Repository};

use crate::sort::SortKey;

fn date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

pub fn profile(profile: &GithubProfile) -> String {
    let mut lines = vec![
        profile.name.clone().unwrap_or_else(|| profile.login.clone()),
        format!("@{}  {}", profile.login, profile.html_url),
    ];

    if let Some(bio) = &profile.bio {
        lines.push(bio.clone());
    }
    if let Some(location) = &profile.location {
        lines.push(format!("Location: {location}"));
    }

    lines.push(format!("Member since {}", date(&profile.created_at)));
    lines.push(format!(
        "Followers {}  Following {}  Public repos {}",
        profile.followers, profile.following, profile.public_repos
    ));

    lines.join("\n") + "\n"
}

pub fn repos(repos: &[Repository], sort_type: SortKey) -> String {
    if repos.is_empty() {
        return "No repos found\n".to_string();
    }

    let mut out = format!("Repositories ({}, sorted by {sort_type})\n", repos.len());

    for repo in repos {
        out.push_str(&format!(
            "  {:<32} ★ {:<6} ⑂ {:<6} {}\n",
            repo.name,
            repo.stargazers_count,
            repo.forks_count,
            date(&repo.created_at)
        ));

        let details: Vec<&str> = [repo.language.as_deref(), repo.description.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !details.is_empty() {
            out.push_str(&format!("      {}\n", details.join(" | ")));
        }
    }

    out
}

pub fn likes(likes: &[LikeRecord]) -> String {
    if likes.is_empty() {
        return "Nobody has liked your profile yet\n".to_string();
    }

    likes
        .iter()
        .enumerate()
        .map(|(i, like)| {
            format!("{:>3}. {:<39} {}\n", i + 1, like.username, date(&like.liked_date))
        })
        .collect()
}
