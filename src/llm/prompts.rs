//! Prompt templates for document analysis and follow-up questions.
//!
//! Document text and user input are inserted verbatim.

use super::{ChatRole, ChatTurn};

/// User instruction used when an upload does not supply one.
pub const DEFAULT_USER_PROMPT: &str = "Provide a comprehensive analysis.";

/// Model reply in the seeded chat history for follow-up questions.
pub const CONTEXT_ACKNOWLEDGEMENT: &str = "Understood. I have the document context.";

/// Build the structured analysis prompt (Indian legal context).
pub fn build_analysis_prompt(document_text: &str, user_prompt: &str) -> String {
    format!(
        r#"
**Role:** You are an expert legal analyst AI specializing in **Indian Law**.
**Task:** Analyze the provided legal document from the perspective of **Indian law**. Your analysis must be clear, structured, and reference specific clauses. Cite relevant Indian statutes where applicable.

---
**User's Specific Request:** "{user_prompt}"
---
**Document Text:**
{document_text}
---
**Your Structured Analysis (Indian Legal Context):**

### **1.Summary**
*(1.Provide a 1-4 sentence overview of the document's core purpose with key details and risks,
* **Potential Risks: In1-3 sentence** *(Identify clauses on payment, penalties, Identify clauses on indemnification)*
* **General Advice:** *(e.g., "Consult a lawyer practicing in India.")*

### **2. Key Details at a Glance**
| Detail | Information Found (with Clause Reference) |
| :--- | :--- |
| **Governing Law** | *(e.g., Laws of India, Jurisdiction in Delhi (Clause 15.1))* |
| **Contract Term** | *(e.g., 24 months from effective date (Section 3))* |
| **Payment Amount**| *(e.g., ₹50,000 INR per month (Annexure A))* |
| **Notice Period** | *(e.g., 60 days for termination (Clause 12.2))* |

### **3. Key Parties & Their Roles**
* **Party A:** *(Identify the party and their role.)*
* **Party B:** *(Identify the other party and their role.)*

### **4. Key Clauses & Their Implications (under Indian Law)**
* **[Clause Name]:** *(Explain the meaning and impact of a major clause. Cite the source.)*

### **5. Potential Risks & Red Flags 🚩 (Indian Context)**
* **Financial Risk:** *(Identify clauses on payment, penalties. Cite the source.)*
* **Legal/Liability Risk:** *(Identify clauses on indemnification, liability. Cite the source.)*

### **6. Dispute Resolution (Arbitration / Court Jurisdiction)**
* *(Explain how disputes are resolved. Cite Indian law, e.g., Arbitration & Conciliation Act, 1996.)*

### **7. Confidentiality & Intellectual Property**
* *(Highlight clauses on confidentiality and IP ownership. Note who owns the IP.)*

### **8. Compliance & Regulatory Requirements (Indian Laws)**
* *(Note compliance obligations with Indian laws like the Companies Act, 2013; Labour Laws; or the DPDP Act, 2023, if applicable.)*

### **9. Actionable Next Steps (Prioritized)**
1.  **Immediate Action:** *(Suggest the most critical next step.)*
2.  **Recommendation:** *(Suggest an important action.)*
3.  **General Advice:** *(e.g., "Consult a lawyer practicing in India.")*
"#
    )
}

/// Build the prompt for a follow-up question about a document.
pub fn build_qa_prompt(document_text: &str, question: &str) -> String {
    format!(
        r#"
**Context:** You are an AI assistant answering questions about the following legal document. Your answers must be based *only* on the information contained within this document. If the answer is not in the document, say so.
**Document Text:**
---
{document_text}
---
**User's Question:** "{question}"
**Your Answer:**
"#
    )
}

/// Two synthetic turns establishing the document as chat context.
pub fn seed_history(document_text: &str) -> Vec<ChatTurn> {
    vec![
        ChatTurn {
            role: ChatRole::User,
            text: format!("Here is the legal document for context:\n\n{document_text}"),
        },
        ChatTurn {
            role: ChatRole::Model,
            text: CONTEXT_ACKNOWLEDGEMENT.to_string(),
        },
    ]
}
