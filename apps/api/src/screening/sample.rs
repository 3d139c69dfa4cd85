/// Job description offered by the "load sample" action.
pub const SAMPLE_JOB_DESCRIPTION: &str = "Senior Software Engineer
Requirements:
- 5+ years of experience in Python development
- Strong knowledge of web frameworks (Django, Flask)
- Experience with cloud platforms (AWS, GCP)
- Background in machine learning and data analysis
- Excellent communication and team collaboration skills
Bachelor's degree in Computer Science or related field required";
