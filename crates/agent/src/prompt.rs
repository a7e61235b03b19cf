//! Prompt template: the text sent to the model on every generation turn.
//!
//! A [`PromptTemplate`] is a plain value: the agent owns one, tests build
//! their own, and `[agent]` config can override either half.

use minagent_config::AgentConfig;

pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are an Intelligent Agent Assistant that can both have normal conversations AND use tools to help solve problems.

When you receive input, first determine if it's:
1. A casual conversation or simple question that doesn't require tools
2. A complex task or information request that would benefit from using tools

For casual conversations and simple questions:
- Respond directly with \"Chat Response: [your friendly, conversational answer]\"
- Don't overthink simple questions - just be helpful and natural

For complex tasks requiring tools:
1. Think: break down what information or action is needed
2. Plan: list the steps and which tool(s) you'd use, in order
3. Action: specify which tool to use
4. Action Input: provide the exact input for that tool
5. After each tool result, analyze and determine next steps
6. When you have enough information, provide a final answer

Always be helpful, conversational, and adapt to the user's needs.";

pub const DEFAULT_PROMPT_TEMPLATE: &str = "\
Today is {today}. You have access to these tools:

{tool_description}

When the user asks a question or makes a statement, FIRST determine if you need tools:

If it's a simple question or casual conversation that DOESN'T need tools:
Chat Response: [provide a friendly, direct answer without using tools]

If it DOES require tools to properly answer:
Thought: [analyze what you need to solve this]
Plan: [outline steps, indicating which tools you'd use]
Action: [specify which tool to use - must be one of: {tool_names}]
Action Input: [provide the exact input for that tool]
Observation: [this is where you'll see the tool's output]
(Continue with Thought/Action/Action Input/Observation as needed)
Thought: I now know the answer
Final Answer: [your complete answer to the original question]

Remember:
- Only use tools when they genuinely help solve the query
- For simple questions or casual chat, just respond directly
- Adapt your approach based on the complexity of the request

Question: {question}
{previous_responses}";

/// Values substituted into the template's placeholders.
#[derive(Debug, Clone, Default)]
pub struct PromptInputs<'a> {
    /// `{today}`
    pub today: &'a str,
    /// `{tool_description}`
    pub tool_description: &'a str,
    /// `{tool_names}`
    pub tool_names: &'a str,
    /// `{question}`
    pub question: &'a str,
    /// `{previous_responses}`
    pub previous_responses: &'a str,
}

impl PromptInputs<'_> {
    fn get(&self, placeholder: &str) -> Option<&str> {
        match placeholder {
            "today" => Some(self.today),
            "tool_description" => Some(self.tool_description),
            "tool_names" => Some(self.tool_names),
            "question" => Some(self.question),
            "previous_responses" => Some(self.previous_responses),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub system: String,
    pub template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT, DEFAULT_PROMPT_TEMPLATE)
    }
}

impl PromptTemplate {
    pub fn new(system: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            template: template.into(),
        }
    }

    /// Defaults, with any `[agent]` overrides applied.
    pub fn from_config(config: &AgentConfig) -> Self {
        let mut prompt = Self::default();
        if let Some(system) = &config.system_prompt {
            prompt.system = system.clone();
        }
        if let Some(template) = &config.prompt_template {
            prompt.template = template.clone();
        }
        prompt
    }

    /// Render system prompt and template into one prompt.
    ///
    /// Placeholders are replaced in a single left-to-right pass, so braces
    /// inside substituted text (a tool result, the user's question) are
    /// never expanded again. Unknown `{...}` sequences are left as-is.
    pub fn render(&self, inputs: &PromptInputs<'_>) -> String {
        let source = if self.system.is_empty() {
            self.template.clone()
        } else {
            format!("{}\n\n{}", self.system, self.template)
        };

        let mut out = String::with_capacity(source.len() + inputs.previous_responses.len());
        let mut rest = source.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let value = after
                .find('}')
                .and_then(|close| inputs.get(&after[..close]).map(|v| (close, v)));
            match value {
                Some((close, v)) => {
                    out.push_str(v);
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
}

/// Today's local date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
