// Lead scoring prompt.

/// Builds the single analysis prompt for one submission.
pub fn build_scoring_prompt(
    name: &str,
    email: &str,
    company: Option<&str>,
    message: &str,
) -> String {
    let company = company.unwrap_or("Not provided");
    format!(
        r#"You are an expert sales assistant analyzing incoming business leads.
Analyze this contact submission and provide a detailed lead score.

Contact Information:
- Name: {name}
- Email: {email}
- Company: {company}
- Message: {message}

Please provide:
1. Lead score (0-100, where 100 is highest priority)
2. Priority level (low, medium, high, urgent)
3. Insights including:
   - Urgency level (low, medium, high)
   - Estimated budget level (low, medium, high, enterprise)
   - Industry/sector
   - Key pain points mentioned
4. Suggested personalized response (2-3 sentences)

Return ONLY a JSON object with this exact structure:
{{
  "score": number,
  "priority": "low" | "medium" | "high" | "urgent",
  "insights": {{
    "urgency": "low" | "medium" | "high",
    "budget": "low" | "medium" | "high" | "enterprise",
    "industry": "string",
    "pain_points": ["string"]
  }},
  "suggested_response": "string"
}}"#
    )
}
