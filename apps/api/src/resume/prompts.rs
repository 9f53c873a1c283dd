// All LLM prompt templates for the resume endpoints.

use crate::resume::fields::ResumeFields;

/// Resume enhancement prompt. Replace `{job_description}` and `{resume}` before sending.
pub const ENHANCE_PROMPT_TEMPLATE: &str = r#"You need to act as a professional Resume Enhancer.
Study the provided resume and enhance it based on the job description below.
Ensure that the resume is tailored specifically to match the job requirements.
Return the result in structured JSON format with sections like summary, skills, experience, etc.
- Job Description: {job_description}
- Resume: {resume}"#;

/// Resume-from-fields prompt.
/// Replace: {name}, {email}, {phone}, {skills}, {experience}, {education},
///          {projects}, {job_description}
pub const BUILD_PROMPT_TEMPLATE: &str = r#"Create a resume based on the following information:

USER DETAILS:
Name: {name}
Email: {email}
Phone: {phone}
Skills: {skills}
Experience: {experience}
Education: {education}
Projects: {projects}

JOB DESCRIPTION:
{job_description}

Please create a well-structured resume in JSON format with the following sections:
- summary
- contactInformation (name, email, phone)
- skills (languages, technologies, others)
- experience (title, company, startDate, endDate, description)
- education (degree, institution, location, startDate, endDate, gpa)
- projects (title, description, technologies, link)

All dates should be in YYYY-MM-DD or YYYY-MM format.
Return ONLY the JSON object, with no additional text."#;

pub fn enhancement_prompt(resume_text: &str, jd_text: &str) -> String {
    fill_template(ENHANCE_PROMPT_TEMPLATE, |key| match key {
        "job_description" => Some(jd_text),
        "resume" => Some(resume_text),
        _ => None,
    })
}

pub fn build_prompt(fields: &ResumeFields) -> String {
    fill_template(BUILD_PROMPT_TEMPLATE, |key| fields.get(key))
}

/// Replaces `{key}` markers in a single pass, so user text containing braces
/// is copied through untouched. Unknown keys are left as written.
fn fill_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after
            .find('}')
            .and_then(|close| lookup(&after[..close]).map(|value| (close, value)));
        match replacement {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
