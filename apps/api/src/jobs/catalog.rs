//! Built-in sample catalog served when no external job API is configured.

use once_cell::sync::Lazy;

use crate::models::job::JobListing;

struct SampleJob {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    description: &'static str,
    skills: &'static [&'static str],
    posted_at: &'static str,
    experience_required: &'static str,
}

const SAMPLE_JOBS: &[SampleJob] = &[
    SampleJob {
        id: "1",
        title: "Senior Frontend Developer",
        company: "TechCorp Inc",
        location: "Remote",
        description: "Build React applications with TypeScript. Experience with Tailwind, state management, and REST APIs required.",
        skills: &["React", "TypeScript", "Tailwind CSS", "REST APIs"],
        posted_at: "2025-02-01",
        experience_required: "4+ years",
    },
    SampleJob {
        id: "2",
        title: "Full Stack Engineer",
        company: "StartupXYZ",
        location: "New York, NY",
        description: "Node.js and React. NestJS backend, PostgreSQL. CI/CD and cloud experience a plus.",
        skills: &["Node.js", "NestJS", "React", "PostgreSQL"],
        posted_at: "2025-02-03",
        experience_required: "3–5 years",
    },
    SampleJob {
        id: "3",
        title: "Junior Software Developer",
        company: "DevShop",
        location: "Remote",
        description: "Entry-level role. JavaScript/TypeScript, HTML/CSS, willingness to learn React and Node.",
        skills: &["JavaScript", "TypeScript", "HTML", "CSS"],
        posted_at: "2025-02-05",
        experience_required: "0–1 year",
    },
    SampleJob {
        id: "4",
        title: "Backend Developer",
        company: "DataFlow",
        location: "Austin, TX",
        description: "Design and maintain APIs. Experience with NestJS, databases, and message queues.",
        skills: &["NestJS", "Node.js", "SQL", "REST"],
        posted_at: "2025-02-04",
        experience_required: "2+ years",
    },
    SampleJob {
        id: "5",
        title: "UI/UX Developer",
        company: "DesignFirst",
        location: "San Francisco, CA",
        description: "Implement designs with React and Tailwind. Accessibility and responsive design focus.",
        skills: &["React", "Tailwind CSS", "Figma", "Accessibility"],
        posted_at: "2025-02-02",
        experience_required: "3+ years",
    },
    SampleJob {
        id: "6",
        title: "DevOps Engineer",
        company: "CloudScale",
        location: "Remote",
        description: "CI/CD, Docker, Kubernetes. Support Node and React deployments.",
        skills: &["Docker", "Kubernetes", "CI/CD", "AWS"],
        posted_at: "2025-02-06",
        experience_required: "5+ years",
    },
    SampleJob {
        id: "7",
        title: "React Developer",
        company: "WebAgency",
        location: "Chicago, IL",
        description: "React, Redux, TypeScript. Build responsive web apps.",
        skills: &["React", "TypeScript", "Redux", "CSS"],
        posted_at: "2025-02-05",
        experience_required: "2+ years",
    },
    SampleJob {
        id: "8",
        title: "Node.js Backend Engineer",
        company: "API Labs",
        location: "Remote",
        description: "REST APIs, NestJS, MongoDB. Microservices experience preferred.",
        skills: &["Node.js", "NestJS", "MongoDB", "REST"],
        posted_at: "2025-02-04",
        experience_required: "3+ years",
    },
    SampleJob {
        id: "9",
        title: "Frontend Engineer",
        company: "SaaS Co",
        location: "Boston, MA",
        description: "React and Tailwind. Focus on performance and UX.",
        skills: &["React", "Tailwind CSS", "JavaScript", "TypeScript"],
        posted_at: "2025-02-03",
        experience_required: "2–4 years",
    },
    SampleJob {
        id: "10",
        title: "Full Stack Developer",
        company: "GrowthTech",
        location: "Denver, CO",
        description: "React frontend, Node backend. PostgreSQL and cloud deployment.",
        skills: &["React", "Node.js", "PostgreSQL", "AWS"],
        posted_at: "2025-02-02",
        experience_required: "3+ years",
    },
    SampleJob {
        id: "11",
        title: "Software Engineer - Frontend",
        company: "FinanceApp",
        location: "Remote",
        description: "Build dashboards with React. TypeScript and testing required.",
        skills: &["React", "TypeScript", "Jest", "Tailwind CSS"],
        posted_at: "2025-02-01",
        experience_required: "1+ year",
    },
    SampleJob {
        id: "12",
        title: "Backend API Developer",
        company: "DataSync",
        location: "Seattle, WA",
        description: "NestJS, Redis, message queues. Design scalable APIs.",
        skills: &["NestJS", "Node.js", "Redis", "REST"],
        posted_at: "2025-01-31",
        experience_required: "4+ years",
    },
];

/// Read-only after first use; shared by every request without locking.
pub static SAMPLE_CATALOG: Lazy<Vec<JobListing>> = Lazy::new(|| {
    SAMPLE_JOBS
        .iter()
        .map(|job| JobListing {
            id: job.id.to_string(),
            title: job.title.to_string(),
            company: job.company.to_string(),
            location: job.location.to_string(),
            description: job.description.to_string(),
            skills: job.skills.iter().map(|s| s.to_string()).collect(),
            apply_link: format!("https://example.com/apply/{}", job.id),
            posted_at: Some(job.posted_at.to_string()),
            experience_required: Some(job.experience_required.to_string()),
            compensation_min: None,
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<_> = SAMPLE_CATALOG.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids.len(), SAMPLE_CATALOG.len());
        assert_eq!(SAMPLE_CATALOG.len(), 12);
    }
}
