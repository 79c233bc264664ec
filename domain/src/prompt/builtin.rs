//! Built-in AWS support prompt techniques
//!
//! Five techniques are registered at startup, in menu order:
//! `default`, `few-shot`, `cot`, `role-tam`, `role-sa`.

use crate::core::error::DomainError;
use crate::prompt::catalog::Catalog;
use crate::prompt::technique::Technique;

/// Zero-shot support specialist prompt
pub const DEFAULT_TEMPLATE: &str = r#"You are a helpful AWS support specialist. Answer the following question clearly and accurately.

Question: {query}

Answer:"#;

/// Two worked support answers followed by the question
pub const FEW_SHOT_TEMPLATE: &str = r#"You are an AWS Enterprise Support specialist. Here are examples of good support responses:

Example 1:
Q: How do I reset my AWS console password?
A: To reset your AWS console password:
1. Go to the AWS sign-in page
2. Click "Forgot password?"
3. Enter your email address
4. Check your email for the reset link
5. Follow the link to create a new password

Example 2:
Q: What should I do if my EC2 instance won't start?
A: If your EC2 instance won't start, follow these steps:
1. Check the instance state in the EC2 console
2. Review the system log for errors
3. Verify your instance type is available in the AZ
4. Check if you've hit any service limits
5. Try stopping and starting (not rebooting) the instance

Now answer this question in the same helpful, step-by-step format:

Q: {query}
A:"#;

/// Four-step troubleshooting scaffold
pub const COT_TEMPLATE: &str = r#"You are an AWS Enterprise Support specialist helping troubleshoot an issue.

Let's think through this step by step:

Question: {query}

Step 1: First, let's understand what the customer is asking...
Step 2: What are the possible causes?
Step 3: What information do we need to diagnose this?
Step 4: What are the recommended actions?

Analysis and Recommendation:"#;

/// Technical Account Manager persona
pub const ROLE_TAM_TEMPLATE: &str = r#"You are a Technical Account Manager (TAM) at AWS Enterprise Support with 10 years of experience. You specialize in helping enterprise customers optimize their AWS infrastructure and resolve complex issues.

When responding:
- Be professional but approachable
- Provide specific, actionable guidance
- Reference AWS best practices and Well-Architected Framework
- Suggest proactive measures to prevent future issues
- Offer to schedule a follow-up if needed

Customer Question: {query}

TAM Response:"#;

/// Solutions Architect persona
pub const ROLE_SA_TEMPLATE: &str = r#"You are a Senior AWS Solutions Architect helping a customer design and troubleshoot their AWS architecture.

When responding:
- Focus on architectural best practices
- Consider scalability, reliability, and cost
- Reference relevant AWS services and features
- Provide diagrams or examples when helpful
- Suggest alternatives if applicable

Question: {query}

Solutions Architect Response:"#;

/// Id of the technique used when none is selected
pub const DEFAULT_TECHNIQUE: &str = "default";

/// Built-in techniques, in registration order, paired with their template bodies.
pub fn builtin_techniques() -> Vec<(Technique, &'static str)> {
    vec![
        (
            Technique::new(DEFAULT_TECHNIQUE, "Zero-shot", "tpl-default")
                .with_description("Ask the question directly with a short role line and no examples.")
                .with_guidance([
                    "Simple factual or how-to questions",
                    "A baseline to compare other techniques against",
                ])
                .with_limitations([
                    "Output format is left entirely to the model",
                    "No guidance for multi-step troubleshooting",
                ]),
            DEFAULT_TEMPLATE,
        ),
        (
            Technique::new("few-shot", "Few-shot", "tpl-few-shot")
                .with_description("Show worked support answers so the model copies their numbered, step-by-step style.")
                .with_guidance([
                    "You want a consistent answer format",
                    "Procedural questions with clear steps",
                ])
                .with_limitations([
                    "Examples cost input tokens on every call",
                    "The model may imitate the examples too literally",
                ]),
            FEW_SHOT_TEMPLATE,
        ),
        (
            Technique::new("cot", "Chain-of-thought", "tpl-cot")
                .with_description("Walk through understanding, causes, needed information and actions before answering.")
                .with_guidance([
                    "Troubleshooting with several possible causes",
                    "Questions where the reasoning matters as much as the answer",
                ])
                .with_limitations([
                    "Longer, slower responses",
                    "Overkill for simple lookups",
                ]),
            COT_TEMPLATE,
        ),
        (
            Technique::new("role-tam", "Role: Technical Account Manager", "tpl-role-tam")
                .with_description("Answer as an experienced TAM focused on actionable, proactive guidance.")
                .with_guidance([
                    "Customer-facing tone",
                    "Operational questions where prevention matters",
                ])
                .with_limitations([
                    "Persona language can add filler",
                    "May offer follow-ups the reader cannot act on",
                ]),
            ROLE_TAM_TEMPLATE,
        ),
        (
            Technique::new("role-sa", "Role: Solutions Architect", "tpl-role-sa")
                .with_description("Answer as a senior Solutions Architect weighing scalability, reliability and cost.")
                .with_guidance([
                    "Design and architecture questions",
                    "Comparing services or alternatives",
                ])
                .with_limitations([
                    "Tends toward broad answers for narrow operational issues",
                ]),
            ROLE_SA_TEMPLATE,
        ),
    ]
}

/// Register every built-in template and technique into an open catalog.
pub fn register_builtins(catalog: &mut Catalog) -> Result<(), DomainError> {
    for (technique, body) in builtin_techniques() {
        catalog.register_template(technique.template_id.clone(), body)?;
        catalog.register_technique(technique)?;
    }
    Ok(())
}
