use axum::response::{Html, IntoResponse};

/// 首页处理器
pub async fn index_handler() -> impl IntoResponse {
    Html(generate_index_html())
}

/// 生成首页HTML内容
fn generate_index_html() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Lesion Classification Service</title>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            color: #333;
        }

        .container {
            background: white;
            border-radius: 20px;
            padding: 40px;
            box-shadow: 0 20px 60px rgba(0, 0, 0, 0.1);
            max-width: 600px;
            width: 90%;
            text-align: center;
        }

        h1 {
            color: #5a67d8;
            margin-bottom: 10px;
            font-size: 2em;
        }

        .subtitle {
            color: #666;
            margin-bottom: 30px;
        }

        .upload-area {
            border: 2px dashed #cbd5e0;
            border-radius: 15px;
            padding: 40px 20px;
            margin: 30px 0;
            cursor: pointer;
            transition: all 0.3s ease;
            background: #f8fafc;
        }

        .upload-area:hover, .upload-area.drag-over {
            border-color: #5a67d8;
            background: #edf2f7;
        }

        .preview {
            max-width: 224px;
            max-height: 224px;
            margin: 20px auto;
            display: none;
            border-radius: 10px;
        }

        .result {
            font-size: 1.5em;
            font-weight: 600;
            margin-top: 20px;
            min-height: 1.5em;
        }

        .result.benign { color: #38a169; }
        .result.malignant { color: #e53e3e; }
        .result.carcinoma { color: #dd6b20; }
        .result.error { color: #718096; font-size: 1em; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Skin Lesion Classifier</h1>
        <p class="subtitle">Upload a photo to get a Benign / Malignant / Carcinoma prediction</p>
        <div class="upload-area" id="uploadArea">
            <p>Click or drop an image here</p>
            <input type="file" id="fileInput" accept="image/*" hidden>
        </div>
        <img class="preview" id="preview" alt="preview">
        <div class="result" id="result"></div>
    </div>

    <script>
        const uploadArea = document.getElementById('uploadArea');
        const fileInput = document.getElementById('fileInput');
        const preview = document.getElementById('preview');
        const result = document.getElementById('result');

        uploadArea.addEventListener('click', () => fileInput.click());
        uploadArea.addEventListener('dragover', e => {
            e.preventDefault();
            uploadArea.classList.add('drag-over');
        });
        uploadArea.addEventListener('dragleave', () => uploadArea.classList.remove('drag-over'));
        uploadArea.addEventListener('drop', e => {
            e.preventDefault();
            uploadArea.classList.remove('drag-over');
            if (e.dataTransfer.files.length) predict(e.dataTransfer.files[0]);
        });
        fileInput.addEventListener('change', () => {
            if (fileInput.files.length) predict(fileInput.files[0]);
        });

        async function predict(file) {
            preview.src = URL.createObjectURL(file);
            preview.style.display = 'block';
            result.className = 'result';
            result.textContent = 'Analyzing...';

            const formData = new FormData();
            formData.append('file', file);

            try {
                const response = await fetch('/predict/upload', { method: 'POST', body: formData });
                const body = await response.json();
                if (!response.ok || !body.success) {
                    throw new Error((body.error && body.error.message) || 'Prediction failed');
                }
                result.textContent = body.data.display;
                result.className = 'result ' + body.data.label.toLowerCase();
            } catch (err) {
                result.textContent = err.message;
                result.className = 'result error';
            }
        }
    </script>
</body>
</html>"#.to_string()
}
